//! Error type shared by the search services.

use ridecast_types::ParseError;

/// Errors returned by [`SearchUpsertService`](crate::SearchUpsertService) and
/// [`CrudService`](crate::CrudService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The weather provider failed or timed out.
    #[error(transparent)]
    Lookup(#[from] ridecast_core::Error),

    /// The store failed for a reason other than a missing record or a
    /// revision conflict.
    #[error(transparent)]
    Store(ridecast_store::Error),

    /// No record with this identifier exists.
    #[error("Search entry not found: {0}")]
    NotFound(String),

    /// The write lost a revision race.
    #[error("Search entry {0} was modified concurrently")]
    Conflict(String),

    /// The request was malformed.
    #[error("{0}")]
    Validation(String),
}

impl From<ridecast_store::Error> for ServiceError {
    fn from(e: ridecast_store::Error) -> Self {
        match e {
            ridecast_store::Error::NotFound(id) => ServiceError::NotFound(id),
            ridecast_store::Error::Conflict(id) => ServiceError::Conflict(id),
            other => ServiceError::Store(other),
        }
    }
}

impl From<ParseError> for ServiceError {
    fn from(e: ParseError) -> Self {
        ServiceError::Validation(e.to_string())
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
