use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::GameId,
    service::GameService,
    types::{FilterOptions, GameRequest, GameResponse, HistoryParams},
};
use crate::shared::{AppError, AppState};

fn game_service(state: &AppState) -> GameService {
    GameService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.player_repository),
    )
}

/// HTTP handler for recording a game
///
/// POST /games
#[instrument(name = "create_game", skip(state, request))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<GameRequest>,
) -> Result<(StatusCode, Json<GameResponse>), AppError> {
    let game = game_service(&state).add_game(request).await?;
    Ok((StatusCode::CREATED, Json(game)))
}

/// HTTP handler for the match history view
///
/// GET /games?player_id=&format=&edition=&start_date=&end_date=&limit=
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<GameResponse>>, AppError> {
    let query = params.into_query(state.history_limit)?;
    let games = game_service(&state).history(query).await?;

    info!(game_count = games.len(), "History listed");
    Ok(Json(games))
}

/// GET /games/{id}
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
) -> Result<Json<GameResponse>, AppError> {
    let game = game_service(&state).get_game(game_id).await?;
    Ok(Json(game))
}

/// PUT /games/{id}
#[instrument(name = "update_game", skip(state, request))]
pub async fn update_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
    Json(request): Json<GameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    let game = game_service(&state).update_game(game_id, request).await?;
    Ok(Json(game))
}

/// DELETE /games/{id}
#[instrument(name = "delete_game", skip(state))]
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<GameId>,
) -> Result<StatusCode, AppError> {
    game_service(&state).delete_game(game_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /games/options
#[instrument(name = "filter_options", skip(state))]
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, AppError> {
    let options = game_service(&state).filter_options().await?;
    Ok(Json(options))
}
