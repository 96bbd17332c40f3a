use super::super::{CollectedData, Outcome, StatCollector};
use crate::games::GameRecord;
use crate::players::PlayerId;

/// Credits the winner with a win and the loser with a loss
pub struct WinLossCollector;

impl WinLossCollector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WinLossCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatCollector for WinLossCollector {
    type Key = PlayerId;

    fn collect(&self, game: &GameRecord) -> Vec<CollectedData<PlayerId>> {
        vec![
            CollectedData::new(game.winner_id, Outcome::Win),
            CollectedData::new(game.loser_id, Outcome::Loss),
        ]
    }
}
