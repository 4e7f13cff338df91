//! Fitness dimensions and the measurement columns that back them.
//!
//! Two mappings exist between national-survey measurement codes and
//! dimensions:
//!
//! - the **canonical** mapping ([`FitnessDimension::canonical_column`]): exactly one
//!   representative test per dimension, used for percentile reference tables
//! - the **descriptive** mapping ([`columns_of`], [`dimension_of_column`]): every
//!   survey code that describes a dimension, used for reporting only

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the six fitness categories a percentile profile is made of.
///
/// Serialized as a `snake_case` id. The national-survey labels are accepted
/// as aliases when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessDimension {
    #[serde(alias = "근력")]
    Strength,
    #[serde(alias = "심폐지구력")]
    CardioEndurance,
    #[serde(alias = "코어")]
    Core,
    #[serde(alias = "유연성")]
    Flexibility,
    #[serde(alias = "민첩성")]
    Agility,
    #[serde(alias = "체성분")]
    BodyComposition,
}

impl FitnessDimension {
    /// All dimensions in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::CardioEndurance,
        Self::Core,
        Self::Flexibility,
        Self::Agility,
        Self::BodyComposition,
    ];

    /// The five performance dimensions (everything except body composition).
    ///
    /// Averages, strongest/weakest lookups and persona rules only consider these.
    pub const PERFORMANCE: [Self; 5] = [
        Self::Strength,
        Self::CardioEndurance,
        Self::Core,
        Self::Flexibility,
        Self::Agility,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::CardioEndurance => "cardio_endurance",
            Self::Core => "core",
            Self::Flexibility => "flexibility",
            Self::Agility => "agility",
            Self::BodyComposition => "body_composition",
        }
    }

    /// Label used by the national fitness survey.
    #[must_use]
    pub const fn survey_label(self) -> &'static str {
        match self {
            Self::Strength => "근력",
            Self::CardioEndurance => "심폐지구력",
            Self::Core => "코어",
            Self::Flexibility => "유연성",
            Self::Agility => "민첩성",
            Self::BodyComposition => "체성분",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::CardioEndurance => "Cardio endurance",
            Self::Core => "Core",
            Self::Flexibility => "Flexibility",
            Self::Agility => "Agility",
            Self::BodyComposition => "Body composition",
        }
    }

    /// Measurement column of the canonical reference test for this dimension.
    #[must_use]
    pub const fn canonical_column(self) -> &'static str {
        match self {
            Self::Strength => "MESURE_IEM_008_VALUE",
            Self::CardioEndurance => "MESURE_IEM_020_VALUE",
            Self::Core => "MESURE_IEM_019_VALUE",
            Self::Flexibility => "MESURE_IEM_012_VALUE",
            Self::Agility => "MESURE_IEM_022_VALUE",
            Self::BodyComposition => "MESURE_IEM_018_VALUE",
        }
    }

    /// Description of the canonical reference test, including its unit.
    #[must_use]
    pub const fn reference_test(self) -> &'static str {
        match self {
            Self::Strength => "right-hand grip strength (kg)",
            Self::CardioEndurance => "20m shuttle run (laps)",
            Self::Core => "cross sit-ups (reps)",
            Self::Flexibility => "sit-and-reach (cm)",
            Self::Agility => "standing long jump (cm)",
            Self::BodyComposition => "body mass index (kg/m²)",
        }
    }
}

impl fmt::Display for FitnessDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown fitness dimension: '{input}'")]
pub struct ParseDimensionError {
    pub input: String,
}

impl FromStr for FitnessDimension {
    type Err = ParseDimensionError;

    /// Parses either the id (`cardio_endurance`) or the survey label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.id().eq_ignore_ascii_case(s) || d.survey_label() == s)
            .ok_or_else(|| ParseDimensionError {
                input: s.to_owned(),
            })
    }
}

const DESCRIPTIVE_COLUMNS: [(FitnessDimension, &[&str]); 6] = [
    (
        FitnessDimension::Strength,
        &[
            "MESURE_IEM_007_VALUE", // grip strength, left
            "MESURE_IEM_008_VALUE", // grip strength, right
            "MESURE_IEM_022_VALUE", // standing long jump
            "MESURE_IEM_023_VALUE", // chair stand
            "MESURE_IEM_028_VALUE", // relative grip strength
            "MESURE_IEM_052_VALUE", // absolute grip strength
        ],
    ),
    (
        FitnessDimension::CardioEndurance,
        &[
            "MESURE_IEM_020_VALUE", // shuttle run
            "MESURE_IEM_024_VALUE", // 6-minute walk
            "MESURE_IEM_025_VALUE", // 2-minute step in place
            "MESURE_IEM_030_VALUE", // shuttle run VO2max
            "MESURE_IEM_031_VALUE",
            "MESURE_IEM_032_VALUE",
            "MESURE_IEM_033_VALUE",
            "MESURE_IEM_034_VALUE",
            "MESURE_IEM_035_VALUE", // treadmill VO2max
            "MESURE_IEM_036_VALUE",
            "MESURE_IEM_037_VALUE", // step test VO2max
        ],
    ),
    (
        FitnessDimension::Core,
        &[
            "MESURE_IEM_009_VALUE", // curl-ups
            "MESURE_IEM_019_VALUE", // cross sit-ups
        ],
    ),
    (FitnessDimension::Flexibility, &["MESURE_IEM_012_VALUE"]),
    (
        FitnessDimension::Agility,
        &[
            "MESURE_IEM_010_VALUE",
            "MESURE_IEM_013_VALUE", // illinois agility
            "MESURE_IEM_014_VALUE",
            "MESURE_IEM_015_VALUE",
            "MESURE_IEM_016_VALUE",
            "MESURE_IEM_017_VALUE",
            "MESURE_IEM_021_VALUE", // 10m 4x shuttle
            "MESURE_IEM_026_VALUE",
            "MESURE_IEM_027_VALUE", // figure-8 walk
            "MESURE_IEM_040_VALUE", // reaction time
            "MESURE_IEM_041_VALUE",
            "MESURE_IEM_043_VALUE",
            "MESURE_IEM_044_VALUE",
            "MESURE_IEM_050_VALUE",
            "MESURE_IEM_051_VALUE",
        ],
    ),
    (
        FitnessDimension::BodyComposition,
        &[
            "MESURE_IEM_001_VALUE", // height
            "MESURE_IEM_002_VALUE", // weight
            "MESURE_IEM_003_VALUE", // body fat
            "MESURE_IEM_004_VALUE", // waist
            "MESURE_IEM_018_VALUE", // BMI
            "MESURE_IEM_029_VALUE",
            "MESURE_IEM_038_VALUE",
            "MESURE_IEM_039_VALUE",
            "MESURE_IEM_042_VALUE", // waist-to-height ratio
        ],
    ),
];

/// All survey columns that describe `dimension`.
#[must_use]
pub fn columns_of(dimension: FitnessDimension) -> &'static [&'static str] {
    DESCRIPTIVE_COLUMNS
        .iter()
        .find(|(d, _)| *d == dimension)
        .map(|(_, columns)| *columns)
        .unwrap_or_default()
}

/// The dimension a survey column describes, if any.
#[must_use]
pub fn dimension_of_column(column: &str) -> Option<FitnessDimension> {
    DESCRIPTIVE_COLUMNS
        .iter()
        .find(|(_, columns)| columns.contains(&column))
        .map(|(d, _)| *d)
}

/// For each dimension, the descriptive columns present in `headers`.
pub fn available_columns<'a, I>(headers: I) -> BTreeMap<FitnessDimension, Vec<&'static str>>
where
    I: IntoIterator<Item = &'a str>,
{
    let headers = headers.into_iter().collect::<Vec<_>>();
    DESCRIPTIVE_COLUMNS
        .iter()
        .map(|(dimension, columns)| {
            let present = columns
                .iter()
                .copied()
                .filter(|c| headers.contains(c))
                .collect();
            (*dimension, present)
        })
        .collect()
}
