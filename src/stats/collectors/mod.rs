mod color;
mod matchup;
mod win_loss;

pub use color::{ColorCollector, ColorCombinationCollector};
pub use matchup::MatchupCollector;
pub use win_loss::WinLossCollector;
