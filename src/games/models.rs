use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

use crate::players::PlayerId;
use crate::shared::AppError;

pub type GameId = i64;

/// Key used for a deck with no recorded colors when grouping by combination
pub const COLORLESS_KEY: &str = "Colorless";

/// Card colors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    Blue,
    Green,
    Red,
    White,
    Black,
}

impl TryFrom<String> for Color {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_str(value.trim())
            .map_err(|_| AppError::Validation(format!("Unknown color: {}", value)))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Game formats the ledger knows about
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
    Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(try_from = "String", into = "String")]
pub enum GameFormat {
    Draft,
    #[strum(serialize = "Cube Draft")]
    CubeDraft,
    Sealed,
    Constructed,
    Commander,
    Arena,
    #[strum(serialize = "Winston Draft")]
    WinstonDraft,
    #[strum(serialize = "Jump In")]
    JumpIn,
    #[strum(serialize = "Booster War")]
    BoosterWar,
}

impl TryFrom<String> for GameFormat {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GameFormat::from_str(value.trim())
            .map_err(|_| AppError::Validation(format!("Unknown game format: {}", value)))
    }
}

impl From<GameFormat> for String {
    fn from(format: GameFormat) -> Self {
        format.to_string()
    }
}

/// Card-set label attached to a game. Open-ended: new sets need no code change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edition(String);

impl Edition {
    /// Normalises a raw label. Blank strings and the literal "None" mean no edition.
    pub fn parse(raw: &str) -> Option<Self> {
        let label = raw.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("none") {
            None
        } else {
            Some(Self(label.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Edition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Duplicate-free set of colors played by one side of a game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorSet(BTreeSet<Color>);

impl ColorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses color labels, failing on the first unknown one
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, AppError> {
        labels
            .iter()
            .map(|label| Color::try_from(label.as_ref().to_string()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, color: Color) -> bool {
        self.0.contains(&color)
    }

    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.0.iter().copied()
    }

    /// Order-independent key for the whole set, e.g. "Blue, Red".
    /// An empty set maps to "Colorless".
    pub fn combination_key(&self) -> String {
        if self.0.is_empty() {
            return COLORLESS_KEY.to_string();
        }
        let mut labels: Vec<String> = self.0.iter().map(Color::to_string).collect();
        labels.sort();
        labels.join(", ")
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(Color::to_string).collect()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A stored match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub format: GameFormat,
    pub edition: Option<Edition>,
    /// `None` when the stored value was null or malformed
    pub winner_colors: Option<ColorSet>,
    pub loser_colors: Option<ColorSet>,
    /// `None` when the stored timestamp was missing or unparseable
    pub played_at: Option<DateTime<Utc>>,
}

impl GameRecord {
    pub fn involves(&self, player_id: PlayerId) -> bool {
        self.winner_id == player_id || self.loser_id == player_id
    }

    /// The other participant, if `player_id` played in this game
    pub fn opponent_of(&self, player_id: PlayerId) -> Option<PlayerId> {
        if self.winner_id == player_id {
            Some(self.loser_id)
        } else if self.loser_id == player_id {
            Some(self.winner_id)
        } else {
            None
        }
    }

    /// Colors on `player_id`'s side, if they played and the data is well formed
    pub fn colors_for(&self, player_id: PlayerId) -> Option<&ColorSet> {
        if self.winner_id == player_id {
            self.winner_colors.as_ref()
        } else if self.loser_id == player_id {
            self.loser_colors.as_ref()
        } else {
            None
        }
    }

    /// True when at least one side recorded a color
    pub fn has_color_data(&self) -> bool {
        let populated = |side: &Option<ColorSet>| side.as_ref().is_some_and(|c| !c.is_empty());
        populated(&self.winner_colors) || populated(&self.loser_colors)
    }

    pub fn played_on(&self) -> Option<NaiveDate> {
        self.played_at.map(|ts| ts.date_naive())
    }
}

/// A validated game waiting to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,
    pub format: GameFormat,
    pub edition: Option<Edition>,
    pub winner_colors: ColorSet,
    pub loser_colors: ColorSet,
    pub played_at: DateTime<Utc>,
}

impl NewGame {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.winner_id == self.loser_id {
            return Err(AppError::Validation(
                "Winner and loser cannot be the same player".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, id: GameId) -> GameRecord {
        GameRecord {
            id,
            winner_id: self.winner_id,
            loser_id: self.loser_id,
            format: self.format,
            edition: self.edition,
            winner_colors: Some(self.winner_colors),
            loser_colors: Some(self.loser_colors),
            played_at: Some(self.played_at),
        }
    }
}
