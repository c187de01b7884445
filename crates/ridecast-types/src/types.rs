//! Core types for Ridecast weather lookups and search records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::revision::Revision;
use crate::score::rideability_score;
use crate::zip::ZipCode;

/// Coordinates and place name resolved from a ZIP code.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResolvedLocation {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Human-readable place name (e.g. "Redmond").
    pub location: String,
}

/// Current weather conditions, already converted to the units the score uses.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CurrentConditions {
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Short description (e.g. "clear sky").
    pub description: String,
    /// Rain in the last hour in mm (0 when not reported).
    pub precipitation: f64,
    /// Visibility in km.
    pub visibility: f64,
    /// Wind speed in m/s.
    pub wind: f64,
    /// Whether the primary condition category is snow.
    pub is_snow: bool,
}

impl CurrentConditions {
    /// Build conditions from the raw provider units.
    ///
    /// Visibility arrives in meters, rain is optional, and snow is detected from
    /// the primary condition category (case-insensitive).
    #[must_use]
    pub fn from_provider(
        temperature: f64,
        humidity: f64,
        description: impl Into<String>,
        main: &str,
        rain_last_hour: Option<f64>,
        visibility_meters: f64,
        wind_speed: f64,
    ) -> Self {
        Self {
            temperature,
            humidity,
            description: description.into(),
            precipitation: rain_last_hour.unwrap_or(0.0),
            visibility: visibility_meters / 1000.0,
            wind: wind_speed,
            is_snow: main.eq_ignore_ascii_case("snow"),
        }
    }
}

/// A persisted weather search.
///
/// Serialized with the document-style field names the browser page reads
/// (`_id`, `_rev`, `zipCode`, `rideabilityScore`, ...).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SearchRecord {
    /// Record identifier (`search-<zip>` or a manual sequence number).
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: String,
    /// Revision assigned by the store on the last successful write.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")
    )]
    pub rev: Option<Revision>,
    /// ZIP code the search was made for.
    pub zip_code: String,
    /// Human-readable place name.
    pub location: String,
    /// Temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Short weather description.
    pub weather: String,
    /// Precipitation in mm.
    pub precipitation: f64,
    /// Visibility in km.
    pub visibility: f64,
    /// Wind speed in m/s.
    pub wind: f64,
    /// Derived rideability score.
    pub rideability_score: i32,
}

impl SearchRecord {
    /// Assemble a fresh lookup record for a ZIP code.
    ///
    /// The record has no revision; the caller decides whether it targets an
    /// existing document.
    #[must_use]
    pub fn from_lookup(
        zip: &ZipCode,
        location: &ResolvedLocation,
        conditions: &CurrentConditions,
    ) -> Self {
        Self {
            id: zip.record_id(),
            rev: None,
            zip_code: zip.as_str().to_string(),
            location: location.location.clone(),
            temperature: conditions.temperature,
            humidity: conditions.humidity,
            weather: conditions.description.clone(),
            precipitation: conditions.precipitation,
            visibility: conditions.visibility,
            wind: conditions.wind,
            rideability_score: conditions.rideability_score(),
        }
    }

    /// Copy of this record carrying the given revision.
    #[must_use]
    pub fn with_rev(mut self, rev: Option<Revision>) -> Self {
        self.rev = rev;
        self
    }

    /// Whether two records hold the same content, ignoring the revision.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.clone().with_rev(None) == other.clone().with_rev(None)
    }
}

/// Fields for a manually entered search.
///
/// The score is computed server-side with snow never flagged, since manual
/// entries have no way to report a snow condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NewSearch {
    pub zip_code: String,
    pub location: String,
    pub temperature: f64,
    pub humidity: f64,
    pub weather: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub precipitation: f64,
    pub visibility: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wind: f64,
}

impl NewSearch {
    /// Turn the entry into a record under the given identifier.
    #[must_use]
    pub fn into_record(self, id: impl Into<String>) -> SearchRecord {
        let rideability_score = rideability_score(
            self.temperature,
            self.visibility,
            false,
            self.precipitation,
            self.wind,
        );
        SearchRecord {
            id: id.into(),
            rev: None,
            zip_code: self.zip_code,
            location: self.location,
            temperature: self.temperature,
            humidity: self.humidity,
            weather: self.weather,
            precipitation: self.precipitation,
            visibility: self.visibility,
            wind: self.wind,
            rideability_score,
        }
    }
}

/// Partial update for a stored search.
///
/// Only the listed fields may be changed; anything else in the request body
/// is rejected. The score is not recomputed when weather fields change.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "camelCase", deny_unknown_fields)
)]
pub struct SearchPatch {
    /// Must match the target identifier when present.
    #[cfg_attr(feature = "serde", serde(rename = "_id", default))]
    pub id: Option<String>,
    /// Expected revision; the stored revision is used when absent.
    #[cfg_attr(feature = "serde", serde(rename = "_rev", default))]
    pub rev: Option<Revision>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub zip_code: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub temperature: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weather: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub precipitation: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visibility: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wind: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rideability_score: Option<i32>,
}

impl SearchPatch {
    /// Apply the provided fields over `record`.
    ///
    /// The identifier and revision are left alone; the caller resolves them.
    pub fn apply(self, record: &mut SearchRecord) {
        if let Some(zip_code) = self.zip_code {
            record.zip_code = zip_code;
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(temperature) = self.temperature {
            record.temperature = temperature;
        }
        if let Some(humidity) = self.humidity {
            record.humidity = humidity;
        }
        if let Some(weather) = self.weather {
            record.weather = weather;
        }
        if let Some(precipitation) = self.precipitation {
            record.precipitation = precipitation;
        }
        if let Some(visibility) = self.visibility {
            record.visibility = visibility;
        }
        if let Some(wind) = self.wind {
            record.wind = wind;
        }
        if let Some(score) = self.rideability_score {
            record.rideability_score = score;
        }
    }
}
