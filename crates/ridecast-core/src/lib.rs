//! Weather lookups for Ridecast.
//!
//! This crate resolves a US ZIP code to a place and fetches the current
//! conditions there, behind the [`WeatherProvider`] trait.
//!
//! # Features
//!
//! - **OpenWeather client**: ZIP geocoding plus One Call current conditions
//! - **Mock provider**: canned responses with failure and latency injection
//!
//! # Quick Start
//!
//! ```no_run
//! use ridecast_core::{OpenWeatherClient, OpenWeatherConfig, WeatherProvider};
//! use ridecast_types::{SearchRecord, ZipCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenWeatherClient::new(OpenWeatherConfig::new("my-api-key"))?;
//!     let zip = ZipCode::parse("98052")?;
//!
//!     let place = client.resolve_zip(&zip).await?;
//!     let now = client.fetch_current_conditions(place.lat, place.lon).await?;
//!
//!     let record = SearchRecord::from_lookup(&zip, &place, &now);
//!     println!("{}: score {}", record.location, record.rideability_score);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod mock;
pub mod openweather;
pub mod traits;

pub use error::{Error, Result};
pub use mock::MockProvider;
pub use openweather::{
    DEFAULT_CONDITIONS_URL, DEFAULT_GEOCODE_URL, DEFAULT_TIMEOUT, OpenWeatherClient,
    OpenWeatherConfig,
};
pub use traits::WeatherProvider;

// Re-export the shared types so callers need only one import.
pub use ridecast_types::{
    CurrentConditions, ResolvedLocation, SearchRecord, ZipCode, rideability_score,
};
