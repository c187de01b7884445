//! HTTP API for Ridecast weather searches.
//!
//! This crate provides a service that:
//! - Looks up current weather for a US ZIP code and scores how rideable it is
//! - Records each lookup as a revisioned document keyed by ZIP code
//! - Exposes create, read, update and delete over the stored searches
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/weather/{zip}` - Look up and record weather for a ZIP code
//! - `GET /api/searches` - List stored searches, newest first
//! - `POST /api/searches` - Store a manual entry
//! - `GET /api/searches/{id}` - Get one search
//! - `PUT /api/searches/{id}` - Merge fields into a search
//! - `DELETE /api/searches/{id}` - Delete a search
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/ridecast/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:5001"
//!
//! [storage]
//! path = "~/.local/share/ridecast/searches.db"
//!
//! [weather]
//! api_key = "your-openweather-key"
//! timeout_secs = 10
//! ```
//!
//! The API key can also come from the `WEATHER_API_KEY` environment
//! variable, and the port from `PORT`.

pub mod api;
pub mod config;
pub mod crud;
pub mod error;
pub mod state;
pub mod upsert;

pub use config::{Config, ConfigError, ServerConfig, StorageConfig, WeatherConfig};
pub use crud::CrudService;
pub use error::ServiceError;
pub use state::AppState;
pub use upsert::SearchUpsertService;
