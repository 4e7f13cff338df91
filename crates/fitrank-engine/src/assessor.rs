use fitrank_reference::{dimension::FitnessDimension, group::Gender, table::ReferenceTable};
use serde::Serialize;

use crate::{
    conversion::{Conversion, ConversionTable, UserTest},
    error::LookupError,
    percentile::{self, PercentileResult},
    profile::{self, FitnessProfile, ValidatedUser},
};

/// Request-time entry point holding the reference and conversion tables.
///
/// Both tables are read-only after construction, so one assessor can serve
/// any number of requests, including from several threads at once.
#[derive(Debug, Clone)]
pub struct Assessor {
    reference: ReferenceTable,
    conversions: ConversionTable,
}

/// A converted test result and its percentile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestPercentile {
    pub test: UserTest,
    pub raw_value: f64,
    pub converted_value: f64,
    pub target_dimension: FitnessDimension,
    #[serde(flatten)]
    pub result: PercentileResult,
}

impl Assessor {
    #[must_use]
    pub fn new(reference: ReferenceTable, conversions: ConversionTable) -> Self {
        Self {
            reference,
            conversions,
        }
    }

    /// Uses the built-in conversion rules.
    #[must_use]
    pub fn with_standard_conversions(reference: ReferenceTable) -> Self {
        Self::new(reference, ConversionTable::standard())
    }

    #[must_use]
    pub fn reference(&self) -> &ReferenceTable {
        &self.reference
    }

    #[must_use]
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    pub fn convert(
        &self,
        test_name: &str,
        raw_value: f64,
        gender: Gender,
        age: u32,
    ) -> Result<Conversion, LookupError> {
        self.conversions.convert(test_name, raw_value, gender, age)
    }

    #[must_use]
    pub fn percentile_of(
        &self,
        gender: Gender,
        age: u32,
        dimension: FitnessDimension,
        value: f64,
    ) -> PercentileResult {
        percentile::percentile_of(&self.reference, gender, age, dimension, value)
    }

    /// Converts a raw test result and looks up its percentile.
    ///
    /// Conversion failures are returned as errors. Reference lookup failures
    /// are carried inside [`TestPercentile::result`].
    pub fn compute_percentile(
        &self,
        test_name: &str,
        raw_value: f64,
        gender: Gender,
        age: u32,
    ) -> Result<TestPercentile, LookupError> {
        let test: UserTest = test_name.parse()?;
        let conversion = self.conversions.convert_test(test, raw_value, gender, age)?;
        let result = self.percentile_of(
            gender,
            age,
            conversion.target_dimension,
            conversion.converted_value,
        );
        Ok(TestPercentile {
            test,
            raw_value,
            converted_value: conversion.converted_value,
            target_dimension: conversion.target_dimension,
            result,
        })
    }

    #[must_use]
    pub fn build_profile(&self, user: &ValidatedUser) -> FitnessProfile {
        profile::build_profile(self, user)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use fitrank_reference::table::{ComponentStats, GroupStats};

    use super::*;

    fn assessor() -> Assessor {
        let core = ComponentStats {
            p5: 10.0,
            p10: 15.0,
            p25: 22.0,
            p50: 30.0,
            p75: 38.0,
            p90: 45.0,
            p95: 50.0,
            mean: 30.0,
            std: 12.0,
            count: 200,
        };
        let table = ReferenceTable::new(BTreeMap::from([(
            "M_20-29세".to_owned(),
            GroupStats::from([(FitnessDimension::Core, core)]),
        )]));
        Assessor::with_standard_conversions(table)
    }

    #[test]
    fn test_compute_percentile_composes_conversion_and_lookup() {
        // 100 s * 0.45 = 45 sit-ups, the P90 anchor
        let result = assessor()
            .compute_percentile("plank", 100.0, Gender::Male, 25)
            .unwrap();
        assert_eq!(result.test, UserTest::Plank);
        assert_eq!(result.converted_value, 45.0);
        assert_eq!(result.target_dimension, FitnessDimension::Core);
        assert_eq!(result.result.percentile, Some(90));
        assert_eq!(result.result.reference_group, "M_20-29세");
    }

    #[test]
    fn test_unknown_test_is_an_error_value() {
        let err = assessor()
            .compute_percentile("jumping_jack", 10.0, Gender::Male, 25)
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown test: 'jumping_jack'");
    }

    #[test]
    fn test_missing_dimension_stays_inside_the_result() {
        let result = assessor()
            .compute_percentile("push_up", 20.0, Gender::Male, 25)
            .unwrap();
        assert_eq!(result.converted_value, 30.0);
        assert_eq!(result.result.percentile, None);
        assert!(matches!(
            result.result.error,
            Some(LookupError::DimensionMissing { .. })
        ));
    }
}
