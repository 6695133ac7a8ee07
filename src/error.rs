// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Nothing here is fatal to the process: every failure degrades to
/// "show the local optimistic state and mark the sync as pending".
#[derive(Debug)]
pub enum AppError {
    /// Network trouble or a timeout talking to the remote store.
    /// Recovered by keeping optimistic local state and deferring sync.
    TransientStore(String),

    /// Malformed input, rejected before it reaches the core functions.
    Validation(String),

    /// An action requiring a user identity was attempted with none.
    NotAuthenticated(String),

    /// A referenced record does not exist.
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::TransientStore(msg) => write!(f, "remote store unavailable: {}", msg),
            AppError::Validation(msg) => write!(f, "invalid input: {}", msg),
            AppError::NotAuthenticated(msg) => write!(f, "not signed in: {}", msg),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `serde_json::Error` into `AppError::Validation`.
/// Allows using `?` operator when decoding store snapshots.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// A store call that outlives its budget is treated as still in flight,
/// no longer awaited.
impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::TransientStore("timed out waiting for the remote store".to_string())
    }
}
