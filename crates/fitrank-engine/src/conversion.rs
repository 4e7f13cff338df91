//! Conversion of user-facing test results into reference-test units.
//!
//! The app's test battery does not match the national reference battery
//! item for item: a plank hold (seconds) stands in for cross sit-ups
//! (repetitions), push-ups for grip strength, and so on. Each [`UserTest`]
//! converts into the unit of its target dimension's canonical test, either
//! through a per-group multiplicative factor or, for the forward fold,
//! through a fixed score → centimetre table.
//!
//! Factor keys use the plain group key form (`M_20-29`).

use std::{collections::BTreeMap, fmt, ops::RangeInclusive, str::FromStr};

use fitrank_reference::{
    dimension::FitnessDimension,
    group::{AgeBucket, Gender, ReferenceGroup},
};
use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// One of the six supported user tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserTest {
    #[serde(alias = "plank")]
    Plank,
    #[serde(alias = "pushUp")]
    PushUp,
    #[serde(alias = "chairSquat")]
    ChairSquat,
    #[serde(alias = "stepTest")]
    StepTest,
    #[serde(alias = "forwardFold")]
    ForwardFold,
    #[serde(alias = "balance")]
    Balance,
}

impl UserTest {
    /// All tests, in profile priority order. This is also the `Ord` order.
    ///
    /// When two tests target the same dimension, the earlier one wins.
    pub const ALL: [Self; 6] = [
        Self::Plank,
        Self::PushUp,
        Self::ChairSquat,
        Self::StepTest,
        Self::ForwardFold,
        Self::Balance,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Plank => "plank",
            Self::PushUp => "push_up",
            Self::ChairSquat => "chair_squat",
            Self::StepTest => "step_test",
            Self::ForwardFold => "forward_fold",
            Self::Balance => "balance",
        }
    }

    /// Dimension whose canonical test this test converts into.
    #[must_use]
    pub const fn target_dimension(self) -> FitnessDimension {
        match self {
            Self::Plank => FitnessDimension::Core,
            Self::PushUp => FitnessDimension::Strength,
            Self::ChairSquat | Self::Balance => FitnessDimension::Agility,
            Self::StepTest => FitnessDimension::CardioEndurance,
            Self::ForwardFold => FitnessDimension::Flexibility,
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Plank => "plank hold (s) -> cross sit-ups (reps)",
            Self::PushUp => "push-ups (reps) -> grip strength (kg), indirect estimate",
            Self::ChairSquat => "30s chair squats (reps) -> standing long jump (cm)",
            Self::StepTest => "1 min step test (steps) -> shuttle run (laps)",
            Self::ForwardFold => "forward fold score (1-5) -> sit-and-reach (cm)",
            Self::Balance => "one-leg stand (s) -> standing long jump (cm), indirect estimate",
        }
    }

    /// Accepted raw input range.
    #[must_use]
    pub const fn valid_range(self) -> RangeInclusive<f64> {
        match self {
            Self::Plank => 0.0..=600.0,
            Self::PushUp | Self::StepTest => 0.0..=200.0,
            Self::ChairSquat => 0.0..=100.0,
            Self::ForwardFold => 1.0..=5.0,
            Self::Balance => 0.0..=300.0,
        }
    }
}

impl fmt::Display for UserTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for UserTest {
    type Err = LookupError;

    /// Accepts `snake_case` ids and their `camelCase` spellings (`push_up`, `pushUp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.id().replace('_', "") == normalized)
            .ok_or_else(|| LookupError::UnknownTest { name: s.to_owned() })
    }
}

/// How one test converts into reference units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestConversion {
    /// Plain group key → multiplicative factor.
    Factors(BTreeMap<String, f64>),
    /// Discrete score → fixed reference value. No interpolation.
    ScoreTable(BTreeMap<u8, f64>),
}

/// Result of converting a user test into reference units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conversion {
    /// Value in reference-test units, rounded to two decimals.
    pub converted_value: f64,
    pub target_dimension: FitnessDimension,
}

/// Conversion rules for every supported test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversionTable {
    tests: BTreeMap<UserTest, TestConversion>,
}

impl Default for ConversionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Factors per age bucket, in [`AgeBucket::ALL`] order.
struct FactorRow {
    male: [f64; 9],
    female: [f64; 9],
}

const PLANK_FACTORS: FactorRow = FactorRow {
    male: [0.48, 0.45, 0.42, 0.38, 0.35, 0.30, 0.25, 0.20, 0.15],
    female: [0.40, 0.38, 0.35, 0.32, 0.28, 0.24, 0.20, 0.15, 0.10],
};
const PUSH_UP_FACTORS: FactorRow = FactorRow {
    male: [1.6, 1.5, 1.4, 1.3, 1.2, 1.1, 1.0, 0.9, 0.8],
    female: [1.3, 1.2, 1.1, 1.0, 0.9, 0.85, 0.8, 0.75, 0.7],
};
const CHAIR_SQUAT_FACTORS: FactorRow = FactorRow {
    male: [8.0, 7.5, 7.0, 6.5, 6.0, 5.5, 5.0, 4.5, 4.0],
    female: [6.5, 6.0, 5.5, 5.0, 4.5, 4.0, 3.5, 3.0, 2.5],
};
const STEP_TEST_FACTORS: FactorRow = FactorRow {
    male: [1.3, 1.2, 1.15, 1.1, 1.05, 1.0, 0.95, 0.9, 0.85],
    female: [1.25, 1.2, 1.15, 1.1, 1.05, 1.0, 0.95, 0.9, 0.85],
};
const BALANCE_FACTORS: FactorRow = FactorRow {
    male: [2.8, 2.5, 2.3, 2.0, 1.8, 1.5, 1.3, 1.0, 0.8],
    female: [2.3, 2.0, 1.8, 1.6, 1.4, 1.2, 1.0, 0.8, 0.6],
};
/// Forward fold score → sit-and-reach centimetres.
const FORWARD_FOLD_CM: [(u8, f64); 5] = [(1, -5.0), (2, 0.0), (3, 5.0), (4, 10.0), (5, 18.0)];

impl FactorRow {
    fn to_conversion(&self) -> TestConversion {
        let genders = [(Gender::Male, &self.male), (Gender::Female, &self.female)];
        let factors = genders
            .into_iter()
            .flat_map(|(gender, factors)| {
                AgeBucket::ALL.into_iter().zip(factors).map(move |(bucket, factor)| {
                    (ReferenceGroup::new(gender, bucket).plain_key(), *factor)
                })
            })
            .collect();
        TestConversion::Factors(factors)
    }
}

impl ConversionTable {
    /// The built-in conversion rules.
    #[must_use]
    pub fn standard() -> Self {
        let tests = BTreeMap::from([
            (UserTest::Plank, PLANK_FACTORS.to_conversion()),
            (UserTest::PushUp, PUSH_UP_FACTORS.to_conversion()),
            (UserTest::ChairSquat, CHAIR_SQUAT_FACTORS.to_conversion()),
            (UserTest::StepTest, STEP_TEST_FACTORS.to_conversion()),
            (
                UserTest::ForwardFold,
                TestConversion::ScoreTable(FORWARD_FOLD_CM.into_iter().collect()),
            ),
            (UserTest::Balance, BALANCE_FACTORS.to_conversion()),
        ]);
        Self { tests }
    }

    #[must_use]
    pub fn new(tests: BTreeMap<UserTest, TestConversion>) -> Self {
        Self { tests }
    }

    #[must_use]
    pub fn rule(&self, test: UserTest) -> Option<&TestConversion> {
        self.tests.get(&test)
    }

    /// Converts a raw result of the test named `test_name`.
    pub fn convert(
        &self,
        test_name: &str,
        raw_value: f64,
        gender: Gender,
        age: u32,
    ) -> Result<Conversion, LookupError> {
        self.convert_test(test_name.parse()?, raw_value, gender, age)
    }

    /// Converts a raw result of `test` into the units of its target dimension.
    pub fn convert_test(
        &self,
        test: UserTest,
        raw_value: f64,
        gender: Gender,
        age: u32,
    ) -> Result<Conversion, LookupError> {
        let group_key = ReferenceGroup::for_age(gender, age).plain_key();
        let converted = match self.tests.get(&test) {
            Some(TestConversion::ScoreTable(table)) => score_key(raw_value)
                .and_then(|score| table.get(&score))
                .copied()
                .ok_or(LookupError::InvalidFlexibilityScore { value: raw_value })?,
            Some(TestConversion::Factors(factors)) => {
                let factor = factors
                    .get(&group_key)
                    .ok_or_else(|| LookupError::MissingFactor { test, group_key })?;
                raw_value * factor
            }
            None => return Err(LookupError::MissingFactor { test, group_key }),
        };
        Ok(Conversion {
            converted_value: round_to_hundredths(converted),
            target_dimension: test.target_dimension(),
        })
    }
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_key(value: f64) -> Option<u8> {
    (value.fract() == 0.0 && (0.0..=f64::from(u8::MAX)).contains(&value)).then(|| value as u8)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    mod parse {
        use super::*;

        #[test]
        fn test_snake_and_camel_case_names() {
            assert_eq!("push_up".parse::<UserTest>(), Ok(UserTest::PushUp));
            assert_eq!("pushUp".parse::<UserTest>(), Ok(UserTest::PushUp));
            assert_eq!("forwardFold".parse::<UserTest>(), Ok(UserTest::ForwardFold));
            assert_eq!(" plank ".parse::<UserTest>(), Ok(UserTest::Plank));
        }

        #[test]
        fn test_unknown_name_is_a_lookup_error() {
            assert_eq!(
                "jumping_jack".parse::<UserTest>(),
                Err(LookupError::UnknownTest {
                    name: "jumping_jack".to_owned()
                })
            );
        }
    }

    mod convert {
        use super::*;

        #[test]
        fn test_linear_factor_is_applied_and_rounded() {
            let table = ConversionTable::standard();
            let conversion = table.convert("plank", 60.0, Gender::Male, 25).unwrap();
            assert_eq!(conversion.converted_value, 27.0);
            assert_eq!(conversion.target_dimension, FitnessDimension::Core);

            let conversion = table.convert("push_up", 25.0, Gender::Female, 63).unwrap();
            assert_eq!(conversion.converted_value, 21.25);
            assert_eq!(conversion.target_dimension, FitnessDimension::Strength);

            let conversion = table.convert("plank", 7.0, Gender::Female, 30).unwrap();
            assert_eq!(conversion.converted_value, 2.45);
        }

        #[test]
        fn test_young_ages_use_teen_factors() {
            let table = ConversionTable::standard();
            let young = table.convert("step_test", 10.0, Gender::Male, 5).unwrap();
            let teen = table.convert("step_test", 10.0, Gender::Male, 15).unwrap();
            assert_eq!(young, teen);
            assert_eq!(young.converted_value, 13.0);
        }

        #[test]
        fn test_flexibility_uses_fixed_lookup_for_every_group() {
            let table = ConversionTable::standard();
            for (gender, age) in [(Gender::Male, 25), (Gender::Female, 71), (Gender::Male, 95)] {
                let conversion = table.convert("forward_fold", 4.0, gender, age).unwrap();
                assert_eq!(conversion.converted_value, 10.0);
                assert_eq!(conversion.target_dimension, FitnessDimension::Flexibility);
            }
            let lowest = table.convert("forward_fold", 1.0, Gender::Male, 25).unwrap();
            assert_eq!(lowest.converted_value, -5.0);
        }

        #[test]
        fn test_flexibility_rejects_values_outside_the_ordinal_set() {
            let table = ConversionTable::standard();
            for value in [0.0, 6.0, 2.5, -1.0, f64::NAN] {
                let err = table
                    .convert_test(UserTest::ForwardFold, value, Gender::Male, 25)
                    .unwrap_err();
                assert!(matches!(err, LookupError::InvalidFlexibilityScore { .. }));
            }
        }

        #[test]
        fn test_missing_factor_is_an_error_value() {
            let mut factors = BTreeMap::new();
            factors.insert("M_20-29".to_owned(), 1.0);
            let table = ConversionTable::new(BTreeMap::from([(
                UserTest::Balance,
                TestConversion::Factors(factors),
            )]));
            assert_eq!(
                table.convert("balance", 10.0, Gender::Female, 25),
                Err(LookupError::MissingFactor {
                    test: UserTest::Balance,
                    group_key: "F_20-29".to_owned()
                })
            );
            assert!(matches!(
                table.convert("plank", 10.0, Gender::Male, 25),
                Err(LookupError::MissingFactor { .. })
            ));
        }

        #[test]
        fn test_conversion_is_deterministic() {
            let table = ConversionTable::standard();
            let a = table.convert("chair_squat", 26.0, Gender::Male, 25);
            let b = table.convert("chair_squat", 26.0, Gender::Male, 25);
            assert_eq!(a, b);
            assert_eq!(a.unwrap().converted_value, 195.0);
        }
    }

    #[test]
    fn test_standard_table_covers_every_test_and_group() {
        let table = ConversionTable::standard();
        for test in UserTest::ALL {
            match table.rule(test).unwrap() {
                TestConversion::Factors(factors) => assert_eq!(factors.len(), 18),
                TestConversion::ScoreTable(scores) => {
                    assert_eq!(test, UserTest::ForwardFold);
                    assert_eq!(scores.len(), 5);
                }
            }
        }
    }

    #[test]
    fn test_table_serialization_round_trips() {
        let table = ConversionTable::standard();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: ConversionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
