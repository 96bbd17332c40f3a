use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{ColorWinRate, MatchupRecord, PlayerWinRate},
    service::StatsService,
    types::ColorStatsParams,
};
use crate::games::{filter::FilterParams, GameFilter};
use crate::players::PlayerId;
use crate::shared::{AppError, AppState};

fn stats_service(state: &AppState) -> StatsService {
    StatsService::new(
        Arc::clone(&state.player_repository),
        Arc::clone(&state.game_repository),
    )
}

/// HTTP handler for the global win-rate table
///
/// GET /stats/win-rates?start_date=&end_date=&edition=&format=
#[instrument(name = "global_win_rates", skip(state))]
pub async fn global_win_rates(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<PlayerWinRate>>, AppError> {
    let filter = GameFilter::try_from(params)?;
    let rows = stats_service(&state).global_win_rates(filter).await?;

    info!(row_count = rows.len(), "Win rates served");
    Ok(Json(rows))
}

/// GET /stats/players/{id}/matchups
#[instrument(name = "matchups", skip(state))]
pub async fn matchups(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
    Query(params): Query<FilterParams>,
) -> Result<Json<Vec<MatchupRecord>>, AppError> {
    let filter = GameFilter::try_from(params)?;
    let rows = stats_service(&state).matchups(player_id, filter).await?;
    Ok(Json(rows))
}

/// GET /stats/players/{id}/colors?mode=per_color|per_combination
#[instrument(name = "color_stats", skip(state))]
pub async fn color_stats(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
    Query(params): Query<ColorStatsParams>,
) -> Result<Json<Vec<ColorWinRate>>, AppError> {
    let (mode, filter) = params.into_parts()?;
    let rows = stats_service(&state)
        .color_stats(player_id, mode, filter)
        .await?;
    Ok(Json(rows))
}
