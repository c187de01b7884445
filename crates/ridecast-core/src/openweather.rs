//! OpenWeather implementation of [`WeatherProvider`].
//!
//! Uses two endpoints:
//!
//! - Geocoding by ZIP (`/geo/1.0/zip?zip=<zip>,US`) for coordinates and the
//!   place name.
//! - One Call (`/data/3.0/onecall`) for current conditions, with the
//!   minutely, hourly, daily and alert sections excluded and metric units.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use ridecast_types::{CurrentConditions, ResolvedLocation, ZipCode};

use crate::error::{Error, Result};
use crate::traits::WeatherProvider;

/// Default geocoding endpoint.
pub const DEFAULT_GEOCODE_URL: &str = "https://api.openweathermap.org/geo/1.0/zip";
/// Default current-conditions endpoint.
pub const DEFAULT_CONDITIONS_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sections of the One Call response we never read.
const EXCLUDED_SECTIONS: &str = "minutely,hourly,daily,alerts";
/// Country every ZIP lookup is restricted to.
const COUNTRY: &str = "US";
/// The provider reports visibility capped at 10 km and omits it in some
/// responses; treat a missing value as the cap.
const MAX_VISIBILITY_METERS: f64 = 10_000.0;
/// Longest error body kept in an error message.
const MAX_ERROR_BODY: usize = 200;

/// Settings for [`OpenWeatherClient`].
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    /// API key sent as `appid`.
    pub api_key: String,
    /// Geocoding endpoint.
    pub geocode_url: String,
    /// Current-conditions endpoint.
    pub conditions_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    /// Config with the public endpoints and default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            conditions_url: DEFAULT_CONDITIONS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the OpenWeather geocoding and One Call APIs.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

#[derive(Debug, Deserialize)]
struct ZipResponse {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OneCallResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temp: f64,
    humidity: f64,
    #[serde(default)]
    visibility: Option<f64>,
    wind_speed: f64,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    rain: Option<RainBlock>,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RainBlock {
    #[serde(rename = "1h")]
    last_hour: Option<f64>,
}

impl From<CurrentBlock> for CurrentConditions {
    fn from(current: CurrentBlock) -> Self {
        let (main, description) = current
            .weather
            .into_iter()
            .next()
            .map(|c| (c.main, c.description))
            .unwrap_or_default();

        CurrentConditions::from_provider(
            current.temp,
            current.humidity,
            description,
            &main,
            current.rain.and_then(|r| r.last_hour),
            current.visibility.unwrap_or(MAX_VISIBILITY_METERS),
            current.wind_speed,
        )
    }
}

impl OpenWeatherClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the API key is empty, or
    /// [`Error::Http`] if the HTTP client cannot be built.
    pub fn new(config: OpenWeatherConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "weather API key is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("ridecast/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }
}

/// Read an error body, cut to a readable length.
async fn error_body(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    body.chars().take(MAX_ERROR_BODY).collect()
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn resolve_zip(&self, zip: &ZipCode) -> Result<ResolvedLocation> {
        let lookup_error = |reason: String| Error::LocationLookup {
            zip: zip.to_string(),
            reason,
        };

        debug!("Resolving ZIP {} via {}", zip, self.config.geocode_url);

        let response = self
            .client
            .get(&self.config.geocode_url)
            .query(&[
                ("zip", format!("{},{}", zip.five_digit(), COUNTRY)),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| lookup_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(lookup_error(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let body: ZipResponse = response
            .json()
            .await
            .map_err(|e| lookup_error(format!("unreadable response: {e}")))?;

        debug!("ZIP {} resolved to {} ({}, {})", zip, body.name, body.lat, body.lon);

        Ok(ResolvedLocation {
            lat: body.lat,
            lon: body.lon,
            location: body.name,
        })
    }

    async fn fetch_current_conditions(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let lookup_error = |reason: String| Error::WeatherLookup { lat, lon, reason };

        debug!("Fetching current conditions at ({}, {})", lat, lon);

        let response = self
            .client
            .get(&self.config.conditions_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("exclude", EXCLUDED_SECTIONS.to_string()),
                ("units", "metric".to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| lookup_error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(lookup_error(format!("HTTP {}: {}", status.as_u16(), body)));
        }

        let body: OneCallResponse = response
            .json()
            .await
            .map_err(|e| lookup_error(format!("unreadable response: {e}")))?;

        Ok(body.current.into())
    }
}
