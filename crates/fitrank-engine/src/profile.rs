//! Per-user percentile profiles.
//!
//! Raw request data is first checked by [`UserData::validate`]. The
//! resulting [`ValidatedUser`] is then turned into a [`FitnessProfile`]:
//! every supplied test is converted and looked up, and BMI is looked up
//! directly against the body-composition anchors. Failures stay local to
//! the affected dimension.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fitrank_reference::{
    dimension::FitnessDimension,
    group::{Gender, ReferenceGroup},
};
use serde::{Deserialize, Serialize};

use crate::{
    assessor::Assessor,
    conversion::UserTest,
    error::ValidationError,
    percentile::PercentileResult,
    persona::PercentileVector,
};

pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 1..=120;
pub const BMI_RANGE: std::ops::RangeInclusive<f64> = 10.0..=50.0;

/// Unvalidated user input, as received from a caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserData {
    pub gender: String,
    pub age: i64,
    #[serde(default)]
    pub bmi: Option<f64>,
    /// Test name → raw result. `null` marks a test that was not taken.
    #[serde(default)]
    pub stamina: BTreeMap<String, Option<f64>>,
}

/// User input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedUser {
    pub gender: Gender,
    pub age: u32,
    pub bmi: Option<f64>,
    /// Supplied results only. Unknown test names are kept as given.
    pub stamina: BTreeMap<String, f64>,
}

impl UserData {
    /// Checks gender, age, BMI and the range of every known test.
    ///
    /// Unknown test names pass through unchecked.
    pub fn validate(&self) -> Result<ValidatedUser, ValidationError> {
        let gender = self
            .gender
            .trim()
            .to_ascii_uppercase()
            .parse::<Gender>()
            .map_err(|_| ValidationError::InvalidGender {
                input: self.gender.clone(),
            })?;

        let age = u32::try_from(self.age)
            .ok()
            .filter(|age| AGE_RANGE.contains(age))
            .ok_or(ValidationError::AgeOutOfRange {
                age: self.age,
                min: *AGE_RANGE.start(),
                max: *AGE_RANGE.end(),
            })?;

        if let Some(bmi) = self.bmi
            && !BMI_RANGE.contains(&bmi)
        {
            return Err(ValidationError::BmiOutOfRange {
                bmi,
                min: *BMI_RANGE.start(),
                max: *BMI_RANGE.end(),
            });
        }

        let mut stamina = BTreeMap::new();
        for (name, value) in &self.stamina {
            let Some(value) = *value else {
                continue;
            };
            if let Ok(test) = name.parse::<UserTest>() {
                let range = test.valid_range();
                if !range.contains(&value) {
                    return Err(ValidationError::TestValueOutOfRange {
                        test,
                        value,
                        min: *range.start(),
                        max: *range.end(),
                    });
                }
            }
            stamina.insert(name.clone(), value);
        }

        Ok(ValidatedUser {
            gender,
            age,
            bmi: self.bmi,
            stamina,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub gender: Gender,
    pub age: u32,
    pub bmi: Option<f64>,
    /// Age bucket label with suffix, e.g. `20-29세`.
    pub age_group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessProfile {
    pub user_info: UserInfo,
    pub percentiles: BTreeMap<FitnessDimension, PercentileResult>,
    /// Mean of the computed performance percentiles, one decimal.
    pub average_score: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

impl FitnessProfile {
    /// Percentile per dimension, dropping error details.
    #[must_use]
    pub fn percentile_vector(&self) -> PercentileVector {
        self.percentiles
            .iter()
            .map(|(dimension, result)| (*dimension, result.percentile))
            .collect()
    }
}

pub(crate) fn build_profile(assessor: &Assessor, user: &ValidatedUser) -> FitnessProfile {
    let group = ReferenceGroup::for_age(user.gender, user.age);

    let mut tests = BTreeMap::new();
    for (name, value) in &user.stamina {
        match name.parse::<UserTest>() {
            Ok(test) => {
                tests.insert(test, *value);
            }
            Err(err) => tracing::warn!("Skipping test result: {err}"),
        }
    }

    let mut percentiles: BTreeMap<FitnessDimension, PercentileResult> = BTreeMap::new();
    for (test, value) in tests {
        let dimension = test.target_dimension();
        if percentiles
            .get(&dimension)
            .is_some_and(|result| result.percentile.is_some())
        {
            continue;
        }
        let result = match assessor
            .conversions()
            .convert_test(test, value, user.gender, user.age)
        {
            Ok(conversion) => {
                assessor.percentile_of(user.gender, user.age, dimension, conversion.converted_value)
            }
            Err(err) => {
                tracing::debug!("Conversion of {test} failed: {err}");
                PercentileResult::failed(err, group.key())
            }
        };
        percentiles.insert(dimension, result);
    }

    if let Some(bmi) = user.bmi {
        let result = assessor.percentile_of(
            user.gender,
            user.age,
            FitnessDimension::BodyComposition,
            bmi,
        );
        percentiles.insert(FitnessDimension::BodyComposition, result);
    }

    let computed: Vec<f64> = FitnessDimension::PERFORMANCE
        .iter()
        .filter_map(|d| percentiles.get(d)?.percentile)
        .map(f64::from)
        .collect();
    #[expect(clippy::cast_precision_loss)]
    let average_score = (!computed.is_empty())
        .then(|| computed.iter().sum::<f64>() / computed.len() as f64)
        .map(|avg| (avg * 10.0).round() / 10.0);

    FitnessProfile {
        user_info: UserInfo {
            gender: user.gender,
            age: user.age,
            bmi: user.bmi,
            age_group: group.bucket.label_with_suffix(),
        },
        percentiles,
        average_score,
        generated_at: Utc::now(),
    }
}
