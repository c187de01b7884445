//! Trait abstraction for the weather provider.
//!
//! This module provides the [`WeatherProvider`] trait that abstracts over the
//! real OpenWeather client and the mock used in tests.

use async_trait::async_trait;

use ridecast_types::{CurrentConditions, ResolvedLocation, ZipCode};

use crate::error::Result;

/// The two chained lookups behind a weather search.
///
/// A search first resolves the ZIP code to coordinates and a place name, then
/// asks for the current conditions at those coordinates. Implementations
/// should not cache either step.
///
/// # Example
///
/// ```ignore
/// use ridecast_core::{WeatherProvider, Result};
/// use ridecast_types::ZipCode;
///
/// async fn print_conditions<P: WeatherProvider>(provider: &P, zip: &ZipCode) -> Result<()> {
///     let place = provider.resolve_zip(zip).await?;
///     let now = provider.fetch_current_conditions(place.lat, place.lon).await?;
///     println!("{}: {}°C, {}", place.location, now.temperature, now.description);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Resolve a US ZIP code to coordinates and a place name.
    ///
    /// Fails with [`Error::LocationLookup`](crate::Error::LocationLookup).
    async fn resolve_zip(&self, zip: &ZipCode) -> Result<ResolvedLocation>;

    /// Fetch current conditions in metric units.
    ///
    /// Fails with [`Error::WeatherLookup`](crate::Error::WeatherLookup).
    async fn fetch_current_conditions(&self, lat: f64, lon: f64) -> Result<CurrentConditions>;
}
