use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    filter::HistoryQuery,
    models::{ColorSet, Edition, GameId, NewGame},
    repository::GameRepository,
    types::{FilterOptions, GameRequest, GameResponse},
};
use crate::players::{repository::PlayerRepository, PlayerDirectory};
use crate::shared::AppError;

/// Service for recording, editing and browsing games
pub struct GameService {
    games: Arc<dyn GameRepository + Send + Sync>,
    players: Arc<dyn PlayerRepository + Send + Sync>,
}

impl GameService {
    pub fn new(
        games: Arc<dyn GameRepository + Send + Sync>,
        players: Arc<dyn PlayerRepository + Send + Sync>,
    ) -> Self {
        Self { games, players }
    }

    /// Validates and records a new game
    #[instrument(skip(self, request))]
    pub async fn add_game(&self, request: GameRequest) -> Result<GameResponse, AppError> {
        let directory = self.directory().await?;
        let played_at = request.played_at.unwrap_or_else(Utc::now);
        let new_game = Self::build_game(request, played_at, &directory)?;

        let record = self.games.create_game(&new_game).await?;
        info!(
            game_id = record.id,
            winner_id = record.winner_id,
            loser_id = record.loser_id,
            format = %record.format,
            "Game recorded"
        );

        Ok(GameResponse::from_record(record, &directory))
    }

    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: GameId) -> Result<GameResponse, AppError> {
        let record = self
            .games
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", game_id)))?;
        let directory = self.directory().await?;

        Ok(GameResponse::from_record(record, &directory))
    }

    /// Replaces all mutable fields of a game. Keeps the stored timestamp
    /// unless the request carries one.
    #[instrument(skip(self, request))]
    pub async fn update_game(
        &self,
        game_id: GameId,
        request: GameRequest,
    ) -> Result<GameResponse, AppError> {
        let existing = self
            .games
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", game_id)))?;

        let directory = self.directory().await?;
        let played_at = request
            .played_at
            .or(existing.played_at)
            .unwrap_or_else(Utc::now);
        let new_game = Self::build_game(request, played_at, &directory)?;

        let record = self.games.update_game(game_id, &new_game).await?;
        info!(game_id, "Game updated");

        Ok(GameResponse::from_record(record, &directory))
    }

    #[instrument(skip(self))]
    pub async fn delete_game(&self, game_id: GameId) -> Result<(), AppError> {
        self.games.delete_game(game_id).await?;
        info!(game_id, "Game deleted");
        Ok(())
    }

    /// Match history, newest first
    #[instrument(skip(self))]
    pub async fn history(&self, query: HistoryQuery) -> Result<Vec<GameResponse>, AppError> {
        let records = self.games.list_games_filtered(&query).await?;
        let directory = self.directory().await?;

        debug!(game_count = records.len(), "History loaded");
        Ok(records
            .into_iter()
            .map(|record| GameResponse::from_record(record, &directory))
            .collect())
    }

    /// Formats and editions that actually occur in stored games
    #[instrument(skip(self))]
    pub async fn filter_options(&self) -> Result<FilterOptions, AppError> {
        let games = self.games.list_games().await?;

        let formats: BTreeSet<_> = games.iter().map(|g| g.format).collect();
        let editions: BTreeSet<Edition> = games.iter().filter_map(|g| g.edition.clone()).collect();

        Ok(FilterOptions {
            formats: formats.into_iter().collect(),
            editions: editions.into_iter().collect(),
        })
    }

    async fn directory(&self) -> Result<PlayerDirectory, AppError> {
        let players = self.players.list_players().await?;
        Ok(PlayerDirectory::new(&players))
    }

    fn build_game(
        request: GameRequest,
        played_at: chrono::DateTime<Utc>,
        directory: &PlayerDirectory,
    ) -> Result<NewGame, AppError> {
        let new_game = NewGame {
            winner_id: request.winner_id,
            loser_id: request.loser_id,
            format: request.format,
            edition: request.edition.as_deref().and_then(Edition::parse),
            winner_colors: request.winner_colors.into_iter().collect::<ColorSet>(),
            loser_colors: request.loser_colors.into_iter().collect::<ColorSet>(),
            played_at,
        };
        new_game.validate().map_err(|e| {
            warn!(error = %e, "Rejected game");
            e
        })?;

        for player_id in [new_game.winner_id, new_game.loser_id] {
            if !directory.contains(player_id) {
                warn!(player_id, "Rejected game with unknown player");
                return Err(AppError::Validation(format!(
                    "Player {} does not exist",
                    player_id
                )));
            }
        }

        Ok(new_game)
    }
}
