// Library crate for the match ledger server
// This file exposes the public API for integration tests

pub mod app;
pub mod cache;
pub mod config;
pub mod db;
pub mod games;
pub mod players;
pub mod shared;
pub mod stats;

// Re-export commonly used types for easier access in tests
pub use app::{build_state, router};
pub use config::AppConfig;
pub use shared::{AppError, AppState};
