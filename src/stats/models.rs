use serde::{Deserialize, Serialize};

use super::calculators::{win_fraction, win_rate_pct};
use crate::games::GameRecord;
use crate::players::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    /// `player_id`'s result in `game`, if they played
    pub fn for_player(game: &GameRecord, player_id: PlayerId) -> Option<Self> {
        if game.winner_id == player_id {
            Some(Outcome::Win)
        } else if game.loser_id == player_id {
            Some(Outcome::Loss)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLossCount {
    pub wins: u32,
    pub losses: u32,
}

impl WinLossCount {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_rate_pct(&self) -> f64 {
        win_rate_pct(self.wins, self.losses)
    }

    pub fn win_fraction(&self) -> f64 {
        win_fraction(self.wins, self.losses)
    }
}

/// How color statistics group a subject's decks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Every color in the deck counts on its own
    #[default]
    PerColor,
    /// The whole color set counts as one key
    PerCombination,
}

/// Row of the global win-rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerWinRate {
    pub player_id: PlayerId,
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    pub total: u32,
    /// Percentage rounded to two decimals
    pub win_rate_pct: f64,
}

/// Row of a subject's head-to-head table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRecord {
    pub opponent_id: PlayerId,
    pub opponent_name: String,
    pub wins: u32,
    pub losses: u32,
    pub total: u32,
    /// Fraction in `[0, 1]`
    pub win_rate: f64,
}

/// Row of a subject's color table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorWinRate {
    /// A single color label or a combination key such as "Blue, Red"
    pub color_key: String,
    pub wins: u32,
    pub losses: u32,
    pub total: u32,
    pub win_rate_pct: f64,
}
