use thiserror::Error;

use crate::players::PlayerId;
use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Store error: {0}")]
    Store(#[from] AppError),

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Store(inner) => inner,
            StatsError::UnknownPlayer(player_id) => {
                AppError::NotFound(format!("Player {} not found", player_id))
            }
        }
    }
}
