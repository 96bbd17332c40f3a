use axum::{
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cache::{CachedGameRepository, CachedPlayerRepository, StoreCache};
use crate::config::AppConfig;
use crate::db::PostgresStore;
use crate::games::repository::{GameRepository, InMemoryGameRepository};
use crate::players::repository::{InMemoryPlayerRepository, PlayerRepository};
use crate::shared::{AppError, AppState};
use crate::{games, players, stats};

/// Picks the store backend from `config` and wraps it in the cache when enabled
pub async fn build_state(config: &AppConfig) -> Result<AppState, AppError> {
    let (player_repository, game_repository): (
        Arc<dyn PlayerRepository + Send + Sync>,
        Arc<dyn GameRepository + Send + Sync>,
    ) = match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url).await?;
            store.init_schema().await?;
            (store.player_repository(), store.game_repository())
        }
        None => {
            info!("DATABASE_URL not set, using in-memory store");
            (
                Arc::new(InMemoryPlayerRepository::new()),
                Arc::new(InMemoryGameRepository::new()),
            )
        }
    };

    let state = match config.cache_ttl {
        Some(ttl) => {
            info!(ttl_secs = ttl.as_secs(), "Store cache enabled");
            let cache = StoreCache::new(ttl);
            AppState::new(
                Arc::new(CachedPlayerRepository::new(player_repository, cache.clone())),
                Arc::new(CachedGameRepository::new(game_repository, cache)),
                config.history_limit,
            )
        }
        None => AppState::new(player_repository, game_repository, config.history_limit),
    };

    Ok(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/players/:id", delete(players::delete_player))
        .route("/games", get(games::list_games).post(games::create_game))
        .route("/games/options", get(games::filter_options))
        .route(
            "/games/:id",
            get(games::get_game)
                .put(games::update_game)
                .delete(games::delete_game),
        )
        .route("/stats/win-rates", get(stats::global_win_rates))
        .route("/stats/players/:id/matchups", get(stats::matchups))
        .route("/stats/players/:id/colors", get(stats::color_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
