// src/lib.rs

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod merge;
pub mod models;
pub mod services;
pub mod state;
pub mod stats;
pub mod store;
pub mod utils;

// Re-export specific items for convenience if needed
pub use error::AppError;
pub use state::AppState;
