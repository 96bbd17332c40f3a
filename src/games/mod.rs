// Public API - what other modules can use
pub use filter::{EditionFilter, GameFilter, HistoryQuery};
pub use handlers::{create_game, delete_game, filter_options, get_game, list_games, update_game};
pub use models::{Color, ColorSet, Edition, GameFormat, GameId, GameRecord, NewGame};
pub use service::GameService;

// Internal modules
pub mod filter;
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
