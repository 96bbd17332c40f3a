use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{
    engine::{compute_color_stats, compute_global_win_rates, compute_matchups},
    models::{ColorMode, ColorWinRate, MatchupRecord, PlayerWinRate},
    StatsError,
};
use crate::games::{repository::GameRepository, GameFilter, GameRecord, HistoryQuery};
use crate::players::{repository::PlayerRepository, PlayerDirectory, PlayerId};

/// Loads games and players from the stores and hands them to the engine
pub struct StatsService {
    players: Arc<dyn PlayerRepository + Send + Sync>,
    games: Arc<dyn GameRepository + Send + Sync>,
}

impl StatsService {
    pub fn new(
        players: Arc<dyn PlayerRepository + Send + Sync>,
        games: Arc<dyn GameRepository + Send + Sync>,
    ) -> Self {
        Self { players, games }
    }

    #[instrument(skip(self))]
    pub async fn global_win_rates(
        &self,
        filter: GameFilter,
    ) -> Result<Vec<PlayerWinRate>, StatsError> {
        let directory = self.directory().await?;
        let games = self.load_games(&filter, None).await?;

        let rows = compute_global_win_rates(&directory, &games, &filter);
        debug!(game_count = games.len(), row_count = rows.len(), "Global win rates computed");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn matchups(
        &self,
        subject: PlayerId,
        filter: GameFilter,
    ) -> Result<Vec<MatchupRecord>, StatsError> {
        let directory = self.subject_directory(subject).await?;
        let games = self.load_games(&filter, Some(subject)).await?;

        let rows = compute_matchups(&directory, &games, subject, &filter);
        debug!(subject, opponent_count = rows.len(), "Matchups computed");
        Ok(rows)
    }

    #[instrument(skip(self))]
    pub async fn color_stats(
        &self,
        subject: PlayerId,
        mode: ColorMode,
        filter: GameFilter,
    ) -> Result<Vec<ColorWinRate>, StatsError> {
        self.subject_directory(subject).await?;
        let games = self.load_games(&filter, Some(subject)).await?;

        let rows = compute_color_stats(&games, subject, mode, &filter);
        debug!(subject, ?mode, key_count = rows.len(), "Color stats computed");
        Ok(rows)
    }

    async fn directory(&self) -> Result<PlayerDirectory, StatsError> {
        let players = self.players.list_players().await?;
        Ok(PlayerDirectory::new(&players))
    }

    /// Directory that is known to contain `subject`
    async fn subject_directory(&self, subject: PlayerId) -> Result<PlayerDirectory, StatsError> {
        let directory = self.directory().await?;
        if !directory.contains(subject) {
            warn!(subject, "Stats requested for unknown player");
            return Err(StatsError::UnknownPlayer(subject));
        }
        Ok(directory)
    }

    /// Pushes the filter down to the store; the engine re-applies it
    async fn load_games(
        &self,
        filter: &GameFilter,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<GameRecord>, StatsError> {
        let query = HistoryQuery {
            filter: filter.clone(),
            player_id,
            limit: None,
        };
        Ok(self.games.list_games_filtered(&query).await?)
    }
}
