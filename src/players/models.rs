use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::shared::AppError;

pub type PlayerId = i64;

/// Longest player name the ledger accepts
pub const MAX_NAME_LEN: usize = 50;

/// Display name used whenever a player id cannot be resolved
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// Database model for the players table
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct PlayerModel {
    pub id: PlayerId,
    pub name: String,
}

/// A validated player name waiting to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    name: String,
}

impl NewPlayer {
    /// Trims the raw name and checks it is non-empty and within the length cap
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(AppError::Validation(
                "Player name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::Validation(format!(
                "Player name too long (max {} characters)",
                MAX_NAME_LEN
            )));
        }
        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Id to name lookup built from one directory fetch
#[derive(Debug, Clone, Default)]
pub struct PlayerDirectory {
    names: HashMap<PlayerId, String>,
}

impl PlayerDirectory {
    pub fn new(players: &[PlayerModel]) -> Self {
        Self {
            names: players.iter().map(|p| (p.id, p.name.clone())).collect(),
        }
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.names.contains_key(&player_id)
    }

    /// Display name for `player_id`, or "Unknown"
    pub fn name(&self, player_id: PlayerId) -> &str {
        self.names
            .get(&player_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_PLAYER_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_directory_resolves_unknown_ids() {
        let directory = PlayerDirectory::new(&[PlayerModel {
            id: 1,
            name: "Alice".to_string(),
        }]);

        assert!(directory.contains(1));
        assert_eq!(directory.name(1), "Alice");
        assert_eq!(directory.name(2), UNKNOWN_PLAYER_NAME);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let player = NewPlayer::parse("  Alice  ").unwrap();
        assert_eq!(player.name(), "Alice");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_parse_rejects_blank_names(#[case] raw: &str) {
        let result = NewPlayer::parse(raw);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_parse_length_cap() {
        let at_cap = "a".repeat(MAX_NAME_LEN);
        assert!(NewPlayer::parse(&at_cap).is_ok());

        let over_cap = "a".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            NewPlayer::parse(&over_cap),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_NAME_LEN);
        assert!(NewPlayer::parse(&accented).is_ok());
    }
}
