mod win_rate;

pub use win_rate::{round_to, sort_by_rate_desc, win_fraction, win_rate_pct};
