//! Rideability scoring.
//!
//! The score starts at [`BASE_SCORE`] and subtracts a penalty for every
//! threshold the conditions cross. Thresholds are cumulative: a visibility of
//! 1 km crosses the 2 km, 5 km and 10 km thresholds and collects all three
//! penalties. There is no floor, so a bad enough day scores below zero.
//!
//! | Condition | Penalty |
//! |-----------|---------|
//! | snow | 8 |
//! | precipitation > 0 mm | 3 |
//! | visibility < 2 km | 5 |
//! | visibility < 5 km | 2 |
//! | visibility < 10 km | 1 |
//! | temperature < 0 °C or > 30 °C | 2 |
//! | temperature < 5 °C or > 25 °C | 1 |
//! | wind > 5 m/s | 1 |
//! | wind > 10 m/s | 2 |

use crate::types::CurrentConditions;

/// Score assigned to perfect riding weather.
pub const BASE_SCORE: i32 = 10;

/// Compute the rideability score for a set of weather inputs.
///
/// Temperature is in °C, visibility in km, precipitation in mm and wind in
/// m/s. All comparisons are strict, so a visibility of exactly 2 km does not
/// collect the 2 km penalty.
///
/// # Examples
///
/// ```
/// use ridecast_types::rideability_score;
///
/// assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 3.1), 10);
/// assert_eq!(rideability_score(18.0, 1.0, false, 0.0, 3.1), 2);
/// ```
#[must_use]
pub fn rideability_score(
    temperature: f64,
    visibility: f64,
    is_snow: bool,
    precipitation: f64,
    wind: f64,
) -> i32 {
    let mut score = BASE_SCORE;

    if is_snow {
        score -= 8;
    }
    if precipitation > 0.0 {
        score -= 3;
    }

    if visibility < 2.0 {
        score -= 5;
    }
    if visibility < 5.0 {
        score -= 2;
    }
    if visibility < 10.0 {
        score -= 1;
    }

    if temperature < 0.0 || temperature > 30.0 {
        score -= 2;
    }
    if temperature < 5.0 || temperature > 25.0 {
        score -= 1;
    }

    if wind > 5.0 {
        score -= 1;
    }
    if wind > 10.0 {
        score -= 2;
    }

    score
}

impl CurrentConditions {
    /// Rideability score for these conditions.
    #[must_use]
    pub fn rideability_score(&self) -> i32 {
        rideability_score(
            self.temperature,
            self.visibility,
            self.is_snow,
            self.precipitation,
            self.wind,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_conditions() {
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 3.0), BASE_SCORE);
    }

    #[test]
    fn test_sample_record_scores_nine() {
        // Mild clear day with 9.9 km visibility
        assert_eq!(rideability_score(18.0, 9.9, false, 0.0, 3.1), 9);
    }

    #[test]
    fn test_worst_case_example() {
        // -8 snow, -3 precip, -5 -2 -1 visibility, -2 -1 temperature, -1 -2 wind
        assert_eq!(rideability_score(-5.0, 1.0, true, 2.0, 12.0), -15);
    }

    #[test]
    fn test_visibility_tiers_are_cumulative() {
        assert_eq!(rideability_score(18.0, 1.0, false, 0.0, 0.0), 10 - 8);
        assert_eq!(rideability_score(18.0, 3.0, false, 0.0, 0.0), 10 - 3);
        assert_eq!(rideability_score(18.0, 7.0, false, 0.0, 0.0), 10 - 1);
        assert_eq!(rideability_score(18.0, 12.0, false, 0.0, 0.0), 10);
    }

    #[test]
    fn test_visibility_boundaries_are_strict() {
        assert_eq!(rideability_score(18.0, 2.0, false, 0.0, 0.0), 10 - 2 - 1);
        assert_eq!(rideability_score(18.0, 5.0, false, 0.0, 0.0), 10 - 1);
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 0.0), 10);
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(rideability_score(-0.5, 10.0, false, 0.0, 0.0), 7);
        assert_eq!(rideability_score(0.0, 10.0, false, 0.0, 0.0), 9);
        assert_eq!(rideability_score(4.9, 10.0, false, 0.0, 0.0), 9);
        assert_eq!(rideability_score(5.0, 10.0, false, 0.0, 0.0), 10);
        assert_eq!(rideability_score(25.0, 10.0, false, 0.0, 0.0), 10);
        assert_eq!(rideability_score(25.1, 10.0, false, 0.0, 0.0), 9);
        assert_eq!(rideability_score(30.0, 10.0, false, 0.0, 0.0), 9);
        assert_eq!(rideability_score(30.1, 10.0, false, 0.0, 0.0), 7);
    }

    #[test]
    fn test_wind_bands() {
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 5.0), 10);
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 5.1), 9);
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 10.0), 9);
        assert_eq!(rideability_score(18.0, 10.0, false, 0.0, 10.1), 7);
    }

    #[test]
    fn test_any_precipitation_costs_three() {
        assert_eq!(rideability_score(18.0, 10.0, false, 0.01, 0.0), 7);
        assert_eq!(rideability_score(18.0, 10.0, false, 25.0, 0.0), 7);
    }

    #[test]
    fn test_snow_alone() {
        assert_eq!(rideability_score(18.0, 10.0, true, 0.0, 0.0), 2);
    }

    #[test]
    fn test_conditions_method_matches_function() {
        let conditions = CurrentConditions {
            temperature: 3.0,
            humidity: 90.0,
            description: "light snow".to_string(),
            precipitation: 0.0,
            visibility: 4.0,
            wind: 6.0,
            is_snow: true,
        };
        assert_eq!(
            conditions.rideability_score(),
            rideability_score(3.0, 4.0, true, 0.0, 6.0)
        );
        assert_eq!(conditions.rideability_score(), 10 - 8 - 2 - 1 - 1 - 1);
    }
}

/// Property-based tests for the score arithmetic.
///
/// ```bash
/// cargo test -p ridecast-types score::proptests
/// ```
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Straightforward restatement of the penalty table.
    fn expected(t: f64, v: f64, snow: bool, p: f64, w: f64) -> i32 {
        let penalties = [
            (snow, 8),
            (p > 0.0, 3),
            (v < 2.0, 5),
            (v < 5.0, 2),
            (v < 10.0, 1),
            (t < 0.0 || t > 30.0, 2),
            (t < 5.0 || t > 25.0, 1),
            (w > 5.0, 1),
            (w > 10.0, 2),
        ];
        BASE_SCORE
            - penalties
                .iter()
                .filter(|(hit, _)| *hit)
                .map(|(_, p)| p)
                .sum::<i32>()
    }

    proptest! {
        #[test]
        fn score_matches_penalty_table(
            t in -40.0f64..50.0,
            v in 0.0f64..20.0,
            snow: bool,
            p in prop_oneof![Just(0.0f64), 0.0f64..50.0],
            w in 0.0f64..30.0,
        ) {
            prop_assert_eq!(rideability_score(t, v, snow, p, w), expected(t, v, snow, p, w));
        }

        #[test]
        fn score_is_deterministic(
            t in -40.0f64..50.0,
            v in 0.0f64..20.0,
            snow: bool,
            p in 0.0f64..50.0,
            w in 0.0f64..30.0,
        ) {
            prop_assert_eq!(rideability_score(t, v, snow, p, w), rideability_score(t, v, snow, p, w));
        }

        #[test]
        fn score_stays_within_penalty_range(
            t: f64,
            v: f64,
            snow: bool,
            p: f64,
            w: f64,
        ) {
            let score = rideability_score(t, v, snow, p, w);
            prop_assert!(score <= BASE_SCORE);
            prop_assert!(score >= BASE_SCORE - 25);
        }
    }
}
