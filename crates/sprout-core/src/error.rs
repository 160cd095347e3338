//! Error types for sprout-core

use thiserror::Error;

/// Result type alias using sprout-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sprout-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Connectivity is absent; expected and routine, retry on the next tick
    #[error("Offline: remote mirror is unreachable")]
    Offline,

    /// Remote I/O failed despite connectivity; transient, retried next tick
    #[error("Transport error: {0}")]
    Transport(String),

    /// An operation referenced a plant id absent from the store
    #[error("Plant not found: {0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Absent connectivity is routine and handled separately from a
        // remote that is reachable but misbehaving.
        if err.is_connect() || err.is_timeout() {
            Self::Offline
        } else {
            Self::Transport(err.to_string())
        }
    }
}
