//! Platform-agnostic types for Ridecast.
//!
//! This crate provides the shared vocabulary used by the weather provider,
//! the store and the HTTP service.
//!
//! # Features
//!
//! - Validated ZIP codes and the `search-<zip>` record identifiers
//! - Search records in the document shape the browser page consumes
//! - Opaque revision tokens for optimistic concurrency
//! - The rideability score
//!
//! # Example
//!
//! ```
//! use ridecast_types::{CurrentConditions, ResolvedLocation, SearchRecord, ZipCode};
//!
//! let zip = ZipCode::parse("98052")?;
//! let location = ResolvedLocation { lat: 47.67, lon: -122.12, location: "Redmond".into() };
//! let conditions = CurrentConditions::from_provider(18.0, 60.0, "clear sky", "Clear", None, 10_000.0, 3.1);
//!
//! let record = SearchRecord::from_lookup(&zip, &location, &conditions);
//! assert_eq!(record.id, "search-98052");
//! assert_eq!(record.rideability_score, 10);
//! # Ok::<(), ridecast_types::ParseError>(())
//! ```

pub mod error;
pub mod revision;
pub mod score;
pub mod types;
pub mod zip;

pub use error::{ParseError, ParseResult};
pub use revision::Revision;
pub use score::{BASE_SCORE, rideability_score};
pub use types::{CurrentConditions, NewSearch, ResolvedLocation, SearchPatch, SearchRecord};
pub use zip::{RECORD_ID_PREFIX, ZipCode};

#[cfg(test)]
mod tests {
    use super::*;

    fn redmond() -> ResolvedLocation {
        ResolvedLocation {
            lat: 47.6740,
            lon: -122.1215,
            location: "Redmond".to_string(),
        }
    }

    fn clear_day() -> CurrentConditions {
        CurrentConditions::from_provider(18.0, 60.0, "clear sky", "Clear", None, 10_000.0, 3.1)
    }

    // --- Provider conversion tests ---

    #[test]
    fn test_visibility_converted_to_km() {
        let c = CurrentConditions::from_provider(10.0, 50.0, "mist", "Mist", None, 1500.0, 1.0);
        assert!((c.visibility - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_rain_defaults_to_zero() {
        assert_eq!(clear_day().precipitation, 0.0);
    }

    #[test]
    fn test_rain_last_hour_used() {
        let c = CurrentConditions::from_provider(10.0, 90.0, "light rain", "Rain", Some(0.4), 8000.0, 4.0);
        assert_eq!(c.precipitation, 0.4);
        assert!(!c.is_snow);
    }

    #[test]
    fn test_snow_detected_case_insensitively() {
        for main in ["Snow", "snow", "SNOW"] {
            let c = CurrentConditions::from_provider(-1.0, 80.0, "snow", main, None, 3000.0, 2.0);
            assert!(c.is_snow, "main {:?}", main);
        }
        let c = CurrentConditions::from_provider(-1.0, 80.0, "sleet", "Sleet", None, 3000.0, 2.0);
        assert!(!c.is_snow);
    }

    // --- SearchRecord tests ---

    #[test]
    fn test_from_lookup_assembles_record() {
        let zip = ZipCode::parse("98052").unwrap();
        let record = SearchRecord::from_lookup(&zip, &redmond(), &clear_day());

        assert_eq!(record.id, "search-98052");
        assert_eq!(record.rev, None);
        assert_eq!(record.zip_code, "98052");
        assert_eq!(record.location, "Redmond");
        assert_eq!(record.temperature, 18.0);
        assert_eq!(record.humidity, 60.0);
        assert_eq!(record.weather, "clear sky");
        assert_eq!(record.precipitation, 0.0);
        assert_eq!(record.visibility, 10.0);
        assert_eq!(record.wind, 3.1);
        assert_eq!(record.rideability_score, 10);
    }

    #[test]
    fn test_from_lookup_scores_snow() {
        let zip = ZipCode::parse("80202").unwrap();
        let snowy = CurrentConditions::from_provider(-2.0, 85.0, "snow", "Snow", None, 1000.0, 6.0);
        let record = SearchRecord::from_lookup(&zip, &redmond(), &snowy);
        // snow 8, visibility 5+2+1, temperature 2+1, wind 1
        assert_eq!(record.rideability_score, 10 - 8 - 8 - 3 - 1);
    }

    #[test]
    fn test_record_json_shape() {
        let zip = ZipCode::parse("98052").unwrap();
        let record = SearchRecord::from_lookup(&zip, &redmond(), &clear_day())
            .with_rev(Some(Revision::parse("1-abc").unwrap()));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], "search-98052");
        assert_eq!(json["_rev"], "1-abc");
        assert_eq!(json["zipCode"], "98052");
        assert_eq!(json["rideabilityScore"], 10);
        assert_eq!(json["weather"], "clear sky");
        assert!(json.get("zip_code").is_none());
    }

    #[test]
    fn test_record_without_rev_omits_field() {
        let zip = ZipCode::parse("98052").unwrap();
        let record = SearchRecord::from_lookup(&zip, &redmond(), &clear_day());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("_rev").is_none());
    }

    #[test]
    fn test_same_content_ignores_rev() {
        let zip = ZipCode::parse("98052").unwrap();
        let a = SearchRecord::from_lookup(&zip, &redmond(), &clear_day());
        let b = a.clone().with_rev(Some(Revision::parse("4-ab").unwrap()));
        assert!(a.same_content(&b));

        let mut c = b.clone();
        c.wind = 9.0;
        assert!(!a.same_content(&c));
    }

    // --- Manual entry tests ---

    #[test]
    fn test_new_search_never_flags_snow() {
        let entry: NewSearch = serde_json::from_value(serde_json::json!({
            "zipCode": "80202",
            "location": "Denver",
            "temperature": -3.0,
            "humidity": 70.0,
            "weather": "heavy snow",
            "precipitation": 0.0,
            "visibility": 12.0,
            "wind": 2.0
        }))
        .unwrap();

        let record = entry.into_record("7");
        assert_eq!(record.id, "7");
        // Only the temperature penalties apply; snow is never counted.
        assert_eq!(record.rideability_score, 7);
    }

    #[test]
    fn test_new_search_requires_core_fields() {
        let result = serde_json::from_value::<NewSearch>(serde_json::json!({
            "zipCode": "80202",
            "location": "Denver"
        }));
        assert!(result.is_err());
    }

    // --- Patch tests ---

    #[test]
    fn test_patch_is_shallow_merge() {
        let zip = ZipCode::parse("98052").unwrap();
        let mut record = SearchRecord::from_lookup(&zip, &redmond(), &clear_day());

        let patch: SearchPatch =
            serde_json::from_value(serde_json::json!({ "location": "Redmond, WA", "wind": 12.0 }))
                .unwrap();
        patch.apply(&mut record);

        assert_eq!(record.location, "Redmond, WA");
        assert_eq!(record.wind, 12.0);
        assert_eq!(record.temperature, 18.0);
        // Score is left as it was.
        assert_eq!(record.rideability_score, 10);
    }

    #[test]
    fn test_patch_can_set_score() {
        let zip = ZipCode::parse("98052").unwrap();
        let mut record = SearchRecord::from_lookup(&zip, &redmond(), &clear_day());
        let patch = SearchPatch {
            rideability_score: Some(3),
            ..Default::default()
        };
        patch.apply(&mut record);
        assert_eq!(record.rideability_score, 3);
    }

    #[test]
    fn test_patch_rejects_unknown_fields() {
        let result = serde_json::from_value::<SearchPatch>(serde_json::json!({
            "location": "Somewhere",
            "isAdmin": true
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("isAdmin"));
    }

    #[test]
    fn test_patch_accepts_document_fields() {
        let patch: SearchPatch = serde_json::from_value(serde_json::json!({
            "_id": "search-98052",
            "_rev": "2-beef",
            "location": "Redmond"
        }))
        .unwrap();
        assert_eq!(patch.id.as_deref(), Some("search-98052"));
        assert_eq!(patch.rev.unwrap().generation(), 2);
    }
}
