use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{NewPlayer, PlayerId},
    repository::PlayerRepository,
    types::{PlayerCreateRequest, PlayerResponse},
};
use crate::shared::AppError;

/// Service for handling player business logic
pub struct PlayerService {
    repository: Arc<dyn PlayerRepository + Send + Sync>,
}

impl PlayerService {
    pub fn new(repository: Arc<dyn PlayerRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Validates the name and registers a new player
    #[instrument(skip(self))]
    pub async fn add_player(&self, request: PlayerCreateRequest) -> Result<PlayerResponse, AppError> {
        let new_player = NewPlayer::parse(&request.name).map_err(|e| {
            warn!(error = %e, "Rejected player name");
            e
        })?;

        let model = self.repository.create_player(&new_player).await?;
        info!(player_id = model.id, name = %model.name, "Player added");

        Ok(model.into())
    }

    #[instrument(skip(self))]
    pub async fn list_players(&self) -> Result<Vec<PlayerResponse>, AppError> {
        let players = self.repository.list_players().await?;
        Ok(players.into_iter().map(PlayerResponse::from).collect())
    }

    /// Removes a player. Games referencing the player are left untouched and
    /// render the player as "Unknown" afterwards.
    #[instrument(skip(self))]
    pub async fn delete_player(&self, player_id: PlayerId) -> Result<(), AppError> {
        self.repository.delete_player(player_id).await?;
        info!(player_id, "Player deleted");
        Ok(())
    }
}
