//! Error types for value parsing in ridecast-types.

use thiserror::Error;

/// Errors that can occur when parsing Ridecast values from user input
/// or storage.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input is not a five-digit US ZIP code (optionally ZIP+4).
    #[error("Invalid ZIP code '{0}': expected 5 digits or ZIP+4 (12345-6789)")]
    InvalidZip(String),

    /// The input is not a `<generation>-<hex>` revision token.
    #[error("Invalid revision token '{0}'")]
    InvalidRevision(String),
}

/// Result type alias using ridecast-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
