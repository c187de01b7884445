//! Error types for ridecast-core.
//!
//! This module defines the errors that can occur while resolving a ZIP code
//! and fetching current conditions from the weather provider.
//!
//! # Error Recovery
//!
//! | Error Type | Strategy | Rationale |
//! |------------|----------|-----------|
//! | [`Error::LocationLookup`] | Do not retry | Unknown ZIP or provider rejected the key |
//! | [`Error::WeatherLookup`] | Retry later | Provider outage or rate limit |
//! | [`Error::Timeout`] | Retry later | Provider slow or unreachable |
//! | [`Error::InvalidConfig`] | Do not retry | Fix configuration and restart |
//!
//! None of these are retried inside the service: a failed lookup aborts the
//! request and nothing is written.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the weather provider.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The geocoding call failed (non-success status, transport error or
    /// unreadable body).
    #[error("Location lookup failed for ZIP {zip}: {reason}")]
    LocationLookup {
        /// The ZIP code being resolved.
        zip: String,
        /// What went wrong.
        reason: String,
    },

    /// The current-conditions call failed.
    #[error("Weather lookup failed at ({lat}, {lon}): {reason}")]
    WeatherLookup {
        /// Latitude requested.
        lat: f64,
        /// Longitude requested.
        lon: f64,
        /// What went wrong.
        reason: String,
    },

    /// A provider call did not finish in time.
    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The timeout duration.
        duration: Duration,
    },

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to build the HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Whether this error came from the provider being unreachable or failing,
    /// as opposed to a local misconfiguration.
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::LocationLookup { .. } | Error::WeatherLookup { .. } | Error::Timeout { .. }
        )
    }
}

/// Result type alias using ridecast-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_lookup_display() {
        let err = Error::LocationLookup {
            zip: "00000".to_string(),
            reason: "HTTP 404".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("00000"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn test_timeout_display() {
        let err = Error::Timeout {
            operation: "resolve_zip".to_string(),
            duration: Duration::from_secs(10),
        };
        assert!(err.to_string().contains("resolve_zip"));
        assert!(err.to_string().contains("10s"));
    }

    #[test]
    fn test_lookup_failure_classification() {
        assert!(
            Error::WeatherLookup {
                lat: 1.0,
                lon: 2.0,
                reason: "HTTP 500".into()
            }
            .is_lookup_failure()
        );
        assert!(!Error::InvalidConfig("missing api key".into()).is_lookup_failure());
    }
}
