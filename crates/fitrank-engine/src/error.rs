use fitrank_reference::dimension::FitnessDimension;
use serde::Serializer;

use crate::conversion::UserTest;

/// A per-field lookup failure.
///
/// These are expected outcomes of partial or unusual input. They are
/// returned as values and recorded next to the affected dimension; they
/// never abort a whole profile.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum LookupError {
    #[display("unknown test: '{name}'")]
    UnknownTest { name: String },
    #[display("no conversion factor for {test} in group {group_key}")]
    MissingFactor { test: UserTest, group_key: String },
    #[display("invalid flexibility score: {value} (expected 1, 2, 3, 4 or 5)")]
    InvalidFlexibilityScore { value: f64 },
    #[display("reference group not found: {group_key}")]
    ReferenceGroupNotFound { group_key: String },
    #[display("{dimension} data missing")]
    DimensionMissing {
        dimension: FitnessDimension,
        group_key: String,
    },
}

/// A defect in caller input, detected before any computation runs.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ValidationError {
    #[display("gender must be M or F, got '{input}'")]
    InvalidGender { input: String },
    #[display("age must be between {min} and {max}, got {age}")]
    AgeOutOfRange { age: i64, min: u32, max: u32 },
    #[display("BMI must be between {min} and {max}, got {bmi}")]
    BmiOutOfRange { bmi: f64, min: f64, max: f64 },
    #[display("{test} must be between {min} and {max}, got {value}")]
    TestValueOutOfRange {
        test: UserTest,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub(crate) fn serialize_display<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: Serializer,
{
    match value {
        Some(value) => serializer.collect_str(value),
        None => serializer.serialize_none(),
    }
}
