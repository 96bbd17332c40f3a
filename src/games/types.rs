use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{
    filter::{FilterParams, GameFilter, HistoryQuery},
    models::{Color, ColorSet, Edition, GameFormat, GameId, GameRecord},
};
use crate::players::{PlayerDirectory, PlayerId};
use crate::shared::AppError;

/// Request payload for recording or editing a game
#[derive(Debug, Clone, Deserialize)]
pub struct GameRequest {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub format: GameFormat,
    /// "None" or blank means no edition
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub winner_colors: Vec<Color>,
    #[serde(default)]
    pub loser_colors: Vec<Color>,
    /// Defaults to now on create; an edit keeps the stored timestamp
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

/// A game with both participants resolved to display names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub id: GameId,
    pub winner_id: PlayerId,
    pub winner_name: String,
    pub loser_id: PlayerId,
    pub loser_name: String,
    pub format: GameFormat,
    pub edition: Option<Edition>,
    pub winner_colors: Option<ColorSet>,
    pub loser_colors: Option<ColorSet>,
    pub played_at: Option<DateTime<Utc>>,
}

impl GameResponse {
    pub fn from_record(record: GameRecord, directory: &PlayerDirectory) -> Self {
        Self {
            id: record.id,
            winner_name: directory.name(record.winner_id).to_string(),
            winner_id: record.winner_id,
            loser_name: directory.name(record.loser_id).to_string(),
            loser_id: record.loser_id,
            format: record.format,
            edition: record.edition,
            winner_colors: record.winner_colors,
            loser_colors: record.loser_colors,
            played_at: record.played_at,
        }
    }
}

/// Query-string parameters of the history view
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub edition: Option<String>,
    pub format: Option<String>,
    pub player_id: Option<PlayerId>,
    pub limit: Option<usize>,
}

impl HistoryParams {
    /// Builds the store query, using `default_limit` when none was given
    pub fn into_query(self, default_limit: usize) -> Result<HistoryQuery, AppError> {
        let filter = GameFilter::try_from(FilterParams {
            start_date: self.start_date,
            end_date: self.end_date,
            edition: self.edition,
            format: self.format,
        })?;

        Ok(HistoryQuery {
            filter,
            player_id: self.player_id,
            limit: Some(self.limit.unwrap_or(default_limit)),
        })
    }
}

/// Distinct categorical values present in stored games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub formats: Vec<GameFormat>,
    pub editions: Vec<Edition>,
}
