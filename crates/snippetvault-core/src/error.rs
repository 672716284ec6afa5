//! Error types for snippetvault-core

use thiserror::Error;

use crate::import::ImportError;

/// Result type alias using snippetvault-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in snippetvault-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// `SQLite` error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Persisted state was written by a newer schema than this build understands
    #[error("Unsupported storage schema version {found} (supported up to {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Import payload rejected
    #[error(transparent)]
    Import(#[from] ImportError),
}
