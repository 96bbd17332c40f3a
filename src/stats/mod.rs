pub mod calculators;
pub mod collectors;
pub mod engine;
pub mod service;
pub mod tally;

mod errors;
mod handlers;
pub mod models;
pub mod types;

pub use engine::{compute_color_stats, compute_global_win_rates, compute_matchups};
pub use errors::StatsError;
pub use handlers::{color_stats, global_win_rates, matchups};
pub use models::*;
pub use service::StatsService;
pub use tally::Tally;

use std::hash::Hash;

use crate::games::GameRecord;

/// Increment a single game contributes to one tally key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedData<K> {
    pub key: K,
    pub outcome: Outcome,
}

impl<K> CollectedData<K> {
    pub fn new(key: K, outcome: Outcome) -> Self {
        Self { key, outcome }
    }
}

/// Grouping key extractor: decides which keys a game counts toward and
/// whether each increment is a win or a loss.
pub trait StatCollector {
    type Key: Eq + Hash + Clone;

    fn collect(&self, game: &GameRecord) -> Vec<CollectedData<Self::Key>>;
}
