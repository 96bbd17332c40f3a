use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::PlayerId,
    service::PlayerService,
    types::{PlayerCreateRequest, PlayerResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for registering a player
///
/// POST /players
#[instrument(name = "create_player", skip(state))]
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<PlayerCreateRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>), AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let player = service.add_player(request).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// HTTP handler for listing players
///
/// GET /players
#[instrument(name = "list_players", skip(state))]
pub async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerResponse>>, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    let players = service.list_players().await?;

    info!(player_count = players.len(), "Players listed");
    Ok(Json(players))
}

/// HTTP handler for deleting a player
///
/// DELETE /players/{id}
#[instrument(name = "delete_player", skip(state))]
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> Result<StatusCode, AppError> {
    let service = PlayerService::new(Arc::clone(&state.player_repository));
    service.delete_player(player_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::Request,
        routing::{delete, get},
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app() -> Router {
        Router::new()
            .route("/players", get(list_players).post(create_player))
            .route("/players/:id", delete(delete_player))
            .with_state(AppStateBuilder::new().build())
    }

    fn post_player(name: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/players")
            .header("content-type", "application/json")
            .body(Body::from(format!(r#"{{"name": "{}"}}"#, name)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_player_handler() {
        let response = app().oneshot(post_player("Alice")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let player: PlayerResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(player.name, "Alice");
    }

    #[tokio::test]
    async fn test_create_player_handler_rejects_blank_name() {
        let response = app().oneshot(post_player("  ")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_unknown_player_is_not_found() {
        let request = Request::builder()
            .method("DELETE")
            .uri("/players/42")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
