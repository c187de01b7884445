//! Error types for ridecast-store.

use std::path::PathBuf;

use ridecast_types::ParseError;

/// Result type for ridecast-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ridecast-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No record with this identifier exists.
    #[error("Search not found: {0}")]
    NotFound(String),

    /// The write carried a missing or stale revision.
    #[error("Revision conflict for {0}")]
    Conflict(String),

    /// A stored or generated revision token was malformed.
    #[error("Invalid revision: {0}")]
    InvalidRevision(#[from] ParseError),
}

impl Error {
    /// Whether this is a revision conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Whether the target record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
