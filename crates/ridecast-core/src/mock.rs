//! Mock weather provider for testing.
//!
//! This module provides a mock provider that can be used for unit testing
//! without reaching the network.
//!
//! The [`MockProvider`] implements the [`WeatherProvider`] trait, allowing it
//! to be used interchangeably with the real client in generic code.
//!
//! # Features
//!
//! - **Failure injection**: Make either lookup fail, always or a set number of times
//! - **Latency simulation**: Add artificial delays to simulate a slow provider
//! - **Call counting**: Check how many lookups a test performed

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ridecast_types::{CurrentConditions, ResolvedLocation, ZipCode};

use crate::error::{Error, Result};
use crate::traits::WeatherProvider;

/// A mock weather provider for testing.
///
/// Every ZIP resolves to the same configured location, and every coordinate
/// pair returns the same configured conditions.
///
/// # Example
///
/// ```
/// use ridecast_core::{MockProvider, WeatherProvider};
/// use ridecast_types::ZipCode;
///
/// #[tokio::main]
/// async fn main() {
///     let provider = MockProvider::new();
///     let zip = ZipCode::parse("98052").unwrap();
///
///     let place = provider.resolve_zip(&zip).await.unwrap();
///     let now = provider.fetch_current_conditions(place.lat, place.lon).await.unwrap();
///     assert_eq!(now.rideability_score(), 10);
///     assert_eq!(provider.resolve_count(), 1);
/// }
/// ```
pub struct MockProvider {
    location: RwLock<ResolvedLocation>,
    conditions: RwLock<CurrentConditions>,
    fail_resolve: AtomicBool,
    fail_conditions: AtomicBool,
    fail_message: RwLock<String>,
    /// Number of calls to fail before succeeding (shared by both lookups).
    remaining_failures: AtomicU32,
    /// Simulated latency per call in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    resolve_count: AtomicU32,
    conditions_count: AtomicU32,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("resolve_count", &self.resolve_count.load(Ordering::Relaxed))
            .field(
                "conditions_count",
                &self.conditions_count.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a provider that reports a clear, mild day in Redmond.
    pub fn new() -> Self {
        Self::with_weather(Self::default_location(), Self::default_conditions())
    }

    /// Create a provider with the given canned responses.
    pub fn with_weather(location: ResolvedLocation, conditions: CurrentConditions) -> Self {
        Self {
            location: RwLock::new(location),
            conditions: RwLock::new(conditions),
            fail_resolve: AtomicBool::new(false),
            fail_conditions: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(0),
            latency_ms: AtomicU64::new(0),
            resolve_count: AtomicU32::new(0),
            conditions_count: AtomicU32::new(0),
        }
    }

    fn default_location() -> ResolvedLocation {
        ResolvedLocation {
            lat: 47.674,
            lon: -122.1215,
            location: "Redmond".to_string(),
        }
    }

    fn default_conditions() -> CurrentConditions {
        CurrentConditions::from_provider(18.0, 60.0, "clear sky", "Clear", None, 10_000.0, 3.1)
    }

    async fn simulate_latency(&self) {
        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
    }

    /// Consume one transient failure if any are left.
    fn take_transient_failure(&self) -> bool {
        self.remaining_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }

    // --- Test control methods ---

    /// Replace the canned location.
    pub async fn set_location(&self, location: ResolvedLocation) {
        *self.location.write().await = location;
    }

    /// Replace the canned conditions.
    pub async fn set_conditions(&self, conditions: CurrentConditions) {
        *self.conditions.write().await = conditions;
    }

    /// Make ZIP resolution fail.
    pub async fn set_fail_resolve(&self, fail: bool, message: Option<&str>) {
        self.fail_resolve.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Make the conditions lookup fail.
    pub async fn set_fail_conditions(&self, fail: bool, message: Option<&str>) {
        self.fail_conditions.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Fail the next `count` calls, then succeed.
    pub fn set_transient_failures(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Set simulated latency for every call.
    ///
    /// Set to `Duration::ZERO` to disable latency simulation.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of ZIP resolutions performed.
    pub fn resolve_count(&self) -> u32 {
        self.resolve_count.load(Ordering::Relaxed)
    }

    /// Number of conditions lookups performed.
    pub fn conditions_count(&self) -> u32 {
        self.conditions_count.load(Ordering::Relaxed)
    }

    /// Reset both call counters.
    pub fn reset_counts(&self) {
        self.resolve_count.store(0, Ordering::Relaxed);
        self.conditions_count.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn resolve_zip(&self, zip: &ZipCode) -> Result<ResolvedLocation> {
        self.simulate_latency().await;
        self.resolve_count.fetch_add(1, Ordering::Relaxed);

        if self.take_transient_failure() || self.fail_resolve.load(Ordering::Relaxed) {
            return Err(Error::LocationLookup {
                zip: zip.to_string(),
                reason: self.fail_message.read().await.clone(),
            });
        }

        Ok(self.location.read().await.clone())
    }

    async fn fetch_current_conditions(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        self.simulate_latency().await;
        self.conditions_count.fetch_add(1, Ordering::Relaxed);

        if self.take_transient_failure() || self.fail_conditions.load(Ordering::Relaxed) {
            return Err(Error::WeatherLookup {
                lat,
                lon,
                reason: self.fail_message.read().await.clone(),
            });
        }

        Ok(self.conditions.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip() -> ZipCode {
        ZipCode::parse("98052").unwrap()
    }

    #[tokio::test]
    async fn test_default_weather() {
        let provider = MockProvider::new();
        let place = provider.resolve_zip(&zip()).await.unwrap();
        assert_eq!(place.location, "Redmond");

        let now = provider
            .fetch_current_conditions(place.lat, place.lon)
            .await
            .unwrap();
        assert_eq!(now.description, "clear sky");
        assert_eq!(provider.resolve_count(), 1);
        assert_eq!(provider.conditions_count(), 1);
    }

    #[tokio::test]
    async fn test_fail_resolve() {
        let provider = MockProvider::new();
        provider.set_fail_resolve(true, Some("HTTP 404")).await;

        let err = provider.resolve_zip(&zip()).await.unwrap_err();
        assert!(matches!(err, Error::LocationLookup { .. }));
        assert!(err.to_string().contains("HTTP 404"));

        // The conditions lookup is unaffected.
        assert!(provider.fetch_current_conditions(1.0, 2.0).await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_conditions() {
        let provider = MockProvider::new();
        provider.set_fail_conditions(true, None).await;

        let err = provider.fetch_current_conditions(1.0, 2.0).await.unwrap_err();
        assert!(matches!(err, Error::WeatherLookup { .. }));
    }

    #[tokio::test]
    async fn test_transient_failures() {
        let provider = MockProvider::new();
        provider.set_transient_failures(2);

        assert!(provider.resolve_zip(&zip()).await.is_err());
        assert!(provider.resolve_zip(&zip()).await.is_err());
        assert!(provider.resolve_zip(&zip()).await.is_ok());
        assert_eq!(provider.resolve_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency() {
        let provider = MockProvider::new();
        provider.set_latency(Duration::from_millis(500));

        let start = tokio::time::Instant::now();
        provider.resolve_zip(&zip()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_set_conditions() {
        let provider = MockProvider::new();
        let snowy = CurrentConditions::from_provider(-4.0, 90.0, "snow", "Snow", None, 800.0, 11.0);
        provider.set_conditions(snowy.clone()).await;

        let now = provider.fetch_current_conditions(0.0, 0.0).await.unwrap();
        assert_eq!(now, snowy);
    }

    #[tokio::test]
    async fn test_reset_counts() {
        let provider = MockProvider::new();
        provider.resolve_zip(&zip()).await.unwrap();
        provider.reset_counts();
        assert_eq!(provider.resolve_count(), 0);
    }
}
