//! Application-wide error types.
//!
//! Library modules use the [`Error`] enum via `thiserror`; the CLI/main
//! boundary uses `anyhow` for convenient propagation.
//!
//! Per-file tag errors are non-fatal: the mining pipeline logs and skips
//! them. Traversal and database errors abort the operation that raised
//! them.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Directory traversal error (bad root, unreadable subdirectory)
    #[error("Traversal error: {0}")]
    Traversal(#[from] walkdir::Error),

    /// Tag container unreadable or unrecognizable
    #[error("Tag error for {path}: {message}")]
    TagRead { path: PathBuf, message: String },

    /// Lookup by primary key or name found nothing
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Non-numeric year token in a search query
    #[error("Invalid year in search query: {0:?}")]
    InvalidYear(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl Error {
    /// Create a tag read error.
    pub fn tag_read(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TagRead {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a not found error.
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Create an invalid year error from a query token.
    pub fn invalid_year(token: impl Into<String>) -> Self {
        Self::InvalidYear(token.into())
    }
}
