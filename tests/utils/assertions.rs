//! Test assertion helpers for stats tables
#![allow(dead_code)] // Test utilities may not all be used in every test

use matchlog::stats::{ColorWinRate, MatchupRecord, PlayerWinRate};

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert a player's row in the global table
pub fn assert_player_rate(rows: &[PlayerWinRate], name: &str, wins: u32, losses: u32, pct: f64) {
    let row = rows
        .iter()
        .find(|r| r.player_name == name)
        .unwrap_or_else(|| panic!("{} missing from win rates: {:?}", name, rows));

    assert_eq!((row.wins, row.losses), (wins, losses), "record of {}", name);
    assert_eq!(row.total, wins + losses, "total of {}", name);
    assert_eq!(row.win_rate_pct, pct, "win rate of {}", name);
}

/// Assert a color key's row in a color table
pub fn assert_color_rate(rows: &[ColorWinRate], key: &str, wins: u32, losses: u32) {
    let row = rows
        .iter()
        .find(|r| r.color_key == key)
        .unwrap_or_else(|| panic!("{} missing from color stats: {:?}", key, rows));

    assert_eq!((row.wins, row.losses), (wins, losses), "record with {}", key);
}

/// Wins and losses across a table must both equal the number of games counted
pub fn assert_partitioned(rows: &[PlayerWinRate], games: u32) {
    let wins: u32 = rows.iter().map(|r| r.wins).sum();
    let losses: u32 = rows.iter().map(|r| r.losses).sum();
    assert_eq!((wins, losses), (games, games));
}

pub fn opponent_names(rows: &[MatchupRecord]) -> Vec<&str> {
    rows.iter().map(|r| r.opponent_name.as_str()).collect()
}
