// Public API - what other modules can use
pub use handlers::{create_player, delete_player, list_players};
pub use models::{NewPlayer, PlayerDirectory, PlayerId, PlayerModel, UNKNOWN_PLAYER_NAME};
pub use service::PlayerService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
