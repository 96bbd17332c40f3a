use std::cmp::Ordering;

/// `wins / (wins + losses)`, or 0 when nothing was played
pub fn win_fraction(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(total)
}

/// Win rate as a percentage rounded to two decimals, or 0 when nothing was played
pub fn win_rate_pct(wins: u32, losses: u32) -> f64 {
    round_to(win_fraction(wins, losses) * 100.0, 2)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Stable sort, highest rate first. Equal rates keep their incoming order.
pub fn sort_by_rate_desc<T>(rows: &mut [T], rate: impl Fn(&T) -> f64) {
    rows.sort_by(|a, b| rate(b).partial_cmp(&rate(a)).unwrap_or(Ordering::Equal));
}
