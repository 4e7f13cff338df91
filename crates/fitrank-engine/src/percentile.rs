//! Percentile lookup against the reference table.

use fitrank_reference::{
    dimension::FitnessDimension,
    group::{Gender, ReferenceGroup},
    table::{ComponentStats, ReferenceTable},
};
use serde::Serialize;

use crate::error::{LookupError, serialize_display};

/// Coarse three-level bucketing of a percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Low,
    Average,
    High,
}

impl Grade {
    /// `< 30` is low, `30..70` average, `>= 70` high.
    #[must_use]
    pub const fn from_percentile(percentile: u8) -> Self {
        match percentile {
            0..30 => Self::Low,
            30..70 => Self::Average,
            _ => Self::High,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Average => "average",
            Self::High => "high",
        }
    }
}

/// Percentile of one dimension, or the reason it could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentileResult {
    pub percentile: Option<u8>,
    pub grade: Option<Grade>,
    /// Key the group was resolved under, or the last key tried.
    pub reference_group: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: Option<LookupError>,
}

impl PercentileResult {
    fn computed(percentile: Option<u8>, reference_group: String) -> Self {
        Self {
            percentile,
            grade: percentile.map(Grade::from_percentile),
            reference_group,
            error: None,
        }
    }

    /// A result carrying `error` and no percentile.
    #[must_use]
    pub fn failed(error: LookupError, reference_group: String) -> Self {
        Self {
            percentile: None,
            grade: None,
            reference_group,
            error: Some(error),
        }
    }
}

/// Interpolates the percentile of `value` from the anchors of `stats`.
///
/// Values at or below P5 give 5 and values at or above P95 give 95. Between
/// anchors the rank is linear and rounded half to even. Returns `None` for a
/// `NaN` value.
#[must_use]
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn interpolate_percentile(value: f64, stats: &ComponentStats) -> Option<u8> {
    let rank = stats.rank_anchors().rank_of(value);
    if rank.is_nan() {
        return None;
    }
    Some(rank.round_ties_even().clamp(5.0, 95.0) as u8)
}

/// Percentile of a converted `value` for `dimension` among people of the
/// same gender and age.
///
/// Lookup failures are reported inside the result.
#[must_use]
pub fn percentile_of(
    table: &ReferenceTable,
    gender: Gender,
    age: u32,
    dimension: FitnessDimension,
    value: f64,
) -> PercentileResult {
    let group = match table.resolve(ReferenceGroup::for_age(gender, age)) {
        Ok(group) => group,
        Err(unresolved) => {
            return PercentileResult::failed(
                LookupError::ReferenceGroupNotFound {
                    group_key: unresolved.attempted_key.clone(),
                },
                unresolved.attempted_key,
            );
        }
    };
    let Some(stats) = group.dimension(dimension) else {
        return PercentileResult::failed(
            LookupError::DimensionMissing {
                dimension,
                group_key: group.key.to_owned(),
            },
            group.key.to_owned(),
        );
    };
    PercentileResult::computed(interpolate_percentile(value, stats), group.key.to_owned())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fitrank_reference::table::GroupStats;

    use super::*;

    fn strength_stats() -> ComponentStats {
        ComponentStats {
            p5: 20.0,
            p10: 25.0,
            p25: 30.0,
            p50: 38.0,
            p75: 45.0,
            p90: 52.0,
            p95: 58.0,
            mean: 38.0,
            std: 11.0,
            count: 500,
        }
    }

    fn table_with(key: &str, stats: GroupStats) -> ReferenceTable {
        ReferenceTable::new(BTreeMap::from([(key.to_owned(), stats)]))
    }

    mod interpolation {
        use super::*;

        #[test]
        fn test_anchor_values_map_to_their_ranks() {
            let stats = strength_stats();
            assert_eq!(interpolate_percentile(38.0, &stats), Some(50));
            assert_eq!(interpolate_percentile(25.0, &stats), Some(10));
            assert_eq!(interpolate_percentile(52.0, &stats), Some(90));
        }

        #[test]
        fn test_between_anchors_is_linear_and_rounded() {
            let stats = strength_stats();
            // 25 + (34 - 30) / (38 - 30) * 25 = 37.5
            assert_eq!(interpolate_percentile(34.0, &stats), Some(38));
            // 50 + (41.5 - 38) / (45 - 38) * 25 = 62.5
            assert_eq!(interpolate_percentile(41.5, &stats), Some(62));
        }

        #[test]
        fn test_tails_are_flat() {
            let stats = strength_stats();
            assert_eq!(interpolate_percentile(20.0, &stats), Some(5));
            assert_eq!(interpolate_percentile(10.0, &stats), Some(5));
            assert_eq!(interpolate_percentile(-1e9, &stats), Some(5));
            assert_eq!(interpolate_percentile(58.0, &stats), Some(95));
            assert_eq!(interpolate_percentile(100.0, &stats), Some(95));
            assert_eq!(interpolate_percentile(1e9, &stats), Some(95));
        }

        #[test]
        fn test_monotone_in_value() {
            let stats = strength_stats();
            let mut previous = 0;
            for step in 0..=800 {
                let value = 10.0 + f64::from(step) * 0.1;
                let percentile = interpolate_percentile(value, &stats).unwrap();
                assert!(percentile >= previous, "{value}: {percentile} < {previous}");
                previous = percentile;
            }
        }

        #[test]
        fn test_nan_has_no_percentile() {
            assert_eq!(interpolate_percentile(f64::NAN, &strength_stats()), None);
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn test_suffixed_key_is_preferred() {
            let table = table_with(
                "M_20-29세",
                GroupStats::from([(FitnessDimension::Strength, strength_stats())]),
            );
            let result = percentile_of(&table, Gender::Male, 25, FitnessDimension::Strength, 38.0);
            assert_eq!(result.percentile, Some(50));
            assert_eq!(result.grade, Some(Grade::Average));
            assert_eq!(result.reference_group, "M_20-29세");
            assert_eq!(result.error, None);
        }

        #[test]
        fn test_plain_key_is_the_fallback() {
            let table = table_with(
                "M_20-29",
                GroupStats::from([(FitnessDimension::Strength, strength_stats())]),
            );
            let result = percentile_of(&table, Gender::Male, 29, FitnessDimension::Strength, 100.0);
            assert_eq!(result.percentile, Some(95));
            assert_eq!(result.grade, Some(Grade::High));
            assert_eq!(result.reference_group, "M_20-29");
        }

        #[test]
        fn test_unknown_group_is_reported() {
            let table = table_with("M_20-29세", GroupStats::new());
            let result = percentile_of(&table, Gender::Female, 45, FitnessDimension::Core, 10.0);
            assert_eq!(result.percentile, None);
            assert_eq!(result.grade, None);
            assert_eq!(result.reference_group, "F_40-49");
            assert_eq!(
                result.error,
                Some(LookupError::ReferenceGroupNotFound {
                    group_key: "F_40-49".to_owned()
                })
            );
        }

        #[test]
        fn test_missing_dimension_is_reported_with_resolved_key() {
            let table = table_with(
                "M_20-29세",
                GroupStats::from([(FitnessDimension::Strength, strength_stats())]),
            );
            let result = percentile_of(&table, Gender::Male, 25, FitnessDimension::Core, 10.0);
            assert_eq!(result.percentile, None);
            assert_eq!(result.reference_group, "M_20-29세");
            let error = result.error.unwrap();
            assert_eq!(error.to_string(), "core data missing");
        }

        #[test]
        fn test_lookup_is_idempotent() {
            let table = table_with(
                "F_60-69세",
                GroupStats::from([(FitnessDimension::Strength, strength_stats())]),
            );
            let a = percentile_of(&table, Gender::Female, 63, FitnessDimension::Strength, 33.3);
            let b = percentile_of(&table, Gender::Female, 63, FitnessDimension::Strength, 33.3);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_percentile(0), Grade::Low);
        assert_eq!(Grade::from_percentile(29), Grade::Low);
        assert_eq!(Grade::from_percentile(30), Grade::Average);
        assert_eq!(Grade::from_percentile(69), Grade::Average);
        assert_eq!(Grade::from_percentile(70), Grade::High);
        assert_eq!(Grade::from_percentile(100), Grade::High);
    }

    #[test]
    fn test_error_serializes_as_message() {
        let result = PercentileResult::failed(
            LookupError::ReferenceGroupNotFound {
                group_key: "M_90+".to_owned(),
            },
            "M_90+".to_owned(),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["percentile"], serde_json::Value::Null);
        assert_eq!(json["error"], "reference group not found: M_90+");
    }
}
