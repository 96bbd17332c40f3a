//! Win-rate aggregation over raw match records.
//!
//! Every view follows the same pass: filter the games, feed them through a
//! [`StatCollector`](super::StatCollector) into a [`Tally`], turn each entry
//! into a row and sort by rate, highest first. Nothing is cached between calls.

use super::{
    calculators::sort_by_rate_desc,
    collectors::{ColorCollector, ColorCombinationCollector, MatchupCollector, WinLossCollector},
    models::{ColorMode, ColorWinRate, MatchupRecord, PlayerWinRate},
    tally::Tally,
};
use crate::games::{GameFilter, GameRecord};
use crate::players::{PlayerDirectory, PlayerId};

/// Win rate of every player with at least one game passing `filter`
pub fn compute_global_win_rates(
    directory: &PlayerDirectory,
    games: &[GameRecord],
    filter: &GameFilter,
) -> Vec<PlayerWinRate> {
    let tally = Tally::collect(&WinLossCollector::new(), filter.apply(games));

    let mut rows: Vec<PlayerWinRate> = tally
        .into_entries()
        .into_iter()
        .map(|(player_id, count)| PlayerWinRate {
            player_id,
            player_name: directory.name(player_id).to_string(),
            wins: count.wins,
            losses: count.losses,
            total: count.total(),
            win_rate_pct: count.win_rate_pct(),
        })
        .collect();

    sort_by_rate_desc(&mut rows, |row| row.win_rate_pct);
    rows
}

/// `subject`'s record against each opponent. Opponents are grouped by id, so
/// two players sharing a name stay separate rows.
pub fn compute_matchups(
    directory: &PlayerDirectory,
    games: &[GameRecord],
    subject: PlayerId,
    filter: &GameFilter,
) -> Vec<MatchupRecord> {
    let eligible = filter.apply(games).filter(|game| game.involves(subject));
    let tally = Tally::collect(&MatchupCollector::new(subject), eligible);

    let mut rows: Vec<MatchupRecord> = tally
        .into_entries()
        .into_iter()
        .map(|(opponent_id, count)| MatchupRecord {
            opponent_id,
            opponent_name: directory.name(opponent_id).to_string(),
            wins: count.wins,
            losses: count.losses,
            total: count.total(),
            win_rate: count.win_fraction(),
        })
        .collect();

    sort_by_rate_desc(&mut rows, |row| row.win_rate);
    rows
}

/// `subject`'s win rate per color or per color combination
pub fn compute_color_stats(
    games: &[GameRecord],
    subject: PlayerId,
    mode: ColorMode,
    filter: &GameFilter,
) -> Vec<ColorWinRate> {
    let eligible = filter.apply(games).filter(|game| game.involves(subject));

    let entries: Vec<(String, _)> = match mode {
        ColorMode::PerColor => Tally::collect(&ColorCollector::new(subject), eligible)
            .into_entries()
            .into_iter()
            .map(|(color, count)| (color.to_string(), count))
            .collect(),
        ColorMode::PerCombination => {
            Tally::collect(&ColorCombinationCollector::new(subject), eligible).into_entries()
        }
    };

    let mut rows: Vec<ColorWinRate> = entries
        .into_iter()
        .map(|(color_key, count)| ColorWinRate {
            color_key,
            wins: count.wins,
            losses: count.losses,
            total: count.total(),
            win_rate_pct: count.win_rate_pct(),
        })
        .collect();

    sort_by_rate_desc(&mut rows, |row| row.win_rate_pct);
    rows
}
