//! REST API endpoints for the ridecast-service.
//!
//! This module provides HTTP endpoints for weather searches and for managing
//! the stored search history.
//!
//! # Concurrency and Lock Acquisition
//!
//! Handlers never hold `state.store` themselves except for the health check.
//! The services take the store mutex once per store call and release it
//! before any provider call or further store call, so a slow weather lookup
//! never blocks other requests.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Lookup and
//! store failures return HTTP 500. Client errors (not found, bad request,
//! conflict) return appropriate 4xx status codes.
//!
//! # Example
//!
//! ```ignore
//! use axum::Router;
//! use ridecast_service::api;
//!
//! let app = api::router().with_state(state);
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{error, warn};

use ridecast_types::{NewSearch, SearchPatch, SearchRecord, ZipCode};

use crate::error::ServiceError;
use crate::state::AppState;

/// Body of every 404 for a search record.
pub const NOT_FOUND_MESSAGE: &str = "Search entry not found";
/// Body of a successful delete.
pub const DELETED_MESSAGE: &str = "Search entry deleted successfully";

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        // Weather lookup (creates or refreshes search-<zip>)
        .route("/api/weather/{zip}", get(search_weather))
        // Search history
        .route("/api/searches", get(list_searches).post(create_search))
        .route(
            "/api/searches/{id}",
            get(get_search).put(update_search).delete(delete_search),
        )
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Number of stored searches, absent if the store could not be queried.
    pub records: Option<u64>,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let count = state.store.lock().await.count();

    let (status, records) = match count {
        Ok(n) => ("ok", Some(n)),
        Err(e) => {
            warn!("Health check could not count records: {}", e);
            ("degraded", None)
        }
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
        records,
    })
}

/// Look up current weather for a ZIP code and record it.
///
/// # Errors
///
/// - 400 if the ZIP code is malformed
/// - 409 if the record kept changing underneath the write
/// - 500 if a provider call fails or times out, or the store fails
async fn search_weather(
    State(state): State<Arc<AppState>>,
    Path(zip): Path<String>,
) -> Result<Json<SearchRecord>, AppError> {
    let zip = ZipCode::parse(&zip).map_err(ServiceError::from)?;
    let record = state.searches.upsert_by_zip(&zip).await?;
    Ok(Json(record))
}

/// List all searches, newest first.
async fn list_searches(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SearchRecord>>, AppError> {
    Ok(Json(state.crud.list().await?))
}

/// Create a manual search entry.
async fn create_search(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewSearch>, JsonRejection>,
) -> Result<(StatusCode, Json<SearchRecord>), AppError> {
    let Json(entry) = payload?;
    let record = state.crud.create(entry).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a single search.
async fn get_search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SearchRecord>, AppError> {
    Ok(Json(state.crud.get(&id).await?))
}

/// Merge fields into a stored search.
///
/// Include `_rev` in the body to make the update conditional on the revision
/// the client last saw.
async fn update_search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SearchPatch>, JsonRejection>,
) -> Result<Json<SearchRecord>, AppError> {
    let Json(patch) = payload?;
    Ok(Json(state.crud.update(&id, patch).await?))
}

/// Delete response.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// Delete a search.
async fn delete_search(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.crud.delete(&id).await?;
    Ok(Json(DeleteResponse {
        message: DELETED_MESSAGE,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ServiceError::Validation(msg) => AppError::BadRequest(msg),
            ServiceError::Conflict(_) => AppError::Conflict(e.to_string()),
            ServiceError::Lookup(_) | ServiceError::Store(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, Json(body)).into_response()
    }
}
