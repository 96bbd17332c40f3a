pub mod actions;
pub mod assertions;
pub mod setup;

// Re-export main utilities for use by test files
pub use actions::GameInput;
#[allow(unused_imports)]
pub use assertions::{assert_color_rate, assert_partitioned, assert_player_rate, opponent_names};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
