//! Reference groups: gender × age-bucket cohorts.
//!
//! Group keys appear in two spellings. Reference documents produced from the
//! national survey decorate the bucket with an age suffix (`M_20-29세`), while
//! conversion factor tables use the bare bucket (`M_20-29`). Lookups against
//! a reference table try [`ReferenceGroup::candidate_keys`] in order.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Suffix appended to age-bucket labels in survey group keys.
pub const AGE_SUFFIX: &str = "세";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M", alias = "m")]
    Male,
    #[serde(rename = "F", alias = "f")]
    Female,
}

impl Gender {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("gender must be M or F, got '{input}'")]
pub struct ParseGenderError {
    pub input: String,
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" | "m" => Ok(Self::Male),
            "F" | "f" => Ok(Self::Female),
            other => Err(ParseGenderError {
                input: other.to_owned(),
            }),
        }
    }
}

/// Decade age range used to group the reference population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    Teens,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    Sixties,
    Seventies,
    Eighties,
    NinetiesPlus,
}

impl AgeBucket {
    pub const ALL: [Self; 9] = [
        Self::Teens,
        Self::Twenties,
        Self::Thirties,
        Self::Forties,
        Self::Fifties,
        Self::Sixties,
        Self::Seventies,
        Self::Eighties,
        Self::NinetiesPlus,
    ];

    /// Maps an age to its bucket. Ages below 10 fold into `10-19`.
    #[must_use]
    pub const fn from_age(age: u32) -> Self {
        match age {
            0..20 => Self::Teens,
            20..30 => Self::Twenties,
            30..40 => Self::Thirties,
            40..50 => Self::Forties,
            50..60 => Self::Fifties,
            60..70 => Self::Sixties,
            70..80 => Self::Seventies,
            80..90 => Self::Eighties,
            _ => Self::NinetiesPlus,
        }
    }

    /// Bucket label without suffix, e.g. `20-29`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Teens => "10-19",
            Self::Twenties => "20-29",
            Self::Thirties => "30-39",
            Self::Forties => "40-49",
            Self::Fifties => "50-59",
            Self::Sixties => "60-69",
            Self::Seventies => "70-79",
            Self::Eighties => "80-89",
            Self::NinetiesPlus => "90+",
        }
    }

    /// Bucket label with the survey suffix, e.g. `20-29세`.
    #[must_use]
    pub fn label_with_suffix(self) -> String {
        format!("{}{AGE_SUFFIX}", self.label())
    }

    /// Parses a label with or without the survey suffix.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let label = label.strip_suffix(AGE_SUFFIX).unwrap_or(label);
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A gender × age-bucket cohort of the reference population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReferenceGroup {
    pub gender: Gender,
    pub bucket: AgeBucket,
}

impl ReferenceGroup {
    #[must_use]
    pub const fn new(gender: Gender, bucket: AgeBucket) -> Self {
        Self { gender, bucket }
    }

    #[must_use]
    pub const fn for_age(gender: Gender, age: u32) -> Self {
        Self::new(gender, AgeBucket::from_age(age))
    }

    /// Group key with the survey suffix, e.g. `M_20-29세`.
    #[must_use]
    pub fn key(self) -> String {
        format!("{}_{}", self.gender, self.bucket.label_with_suffix())
    }

    /// Group key without suffix, e.g. `M_20-29`. Used by conversion factor tables.
    #[must_use]
    pub fn plain_key(self) -> String {
        format!("{}_{}", self.gender, self.bucket.label())
    }

    /// Keys to try, in order, when looking this group up in a reference table.
    #[must_use]
    pub fn candidate_keys(self) -> [String; 2] {
        [self.key(), self.plain_key()]
    }

    /// Parses a group key in either spelling.
    ///
    /// ```
    /// use fitrank_reference::group::{AgeBucket, Gender, ReferenceGroup};
    ///
    /// let group = ReferenceGroup::parse_key("F_60-69세").unwrap();
    /// assert_eq!(group, ReferenceGroup::new(Gender::Female, AgeBucket::Sixties));
    /// assert_eq!(ReferenceGroup::parse_key("F_60-69"), Some(group));
    /// assert_eq!(ReferenceGroup::parse_key("X_60-69"), None);
    /// ```
    #[must_use]
    pub fn parse_key(key: &str) -> Option<Self> {
        let (gender, bucket) = key.split_once('_')?;
        Some(Self::new(gender.parse().ok()?, AgeBucket::from_label(bucket)?))
    }
}

/// Splits a group key into its gender and age-group parts.
///
/// Unlike [`ReferenceGroup::parse_key`], this keeps the parts verbatim and
/// accepts keys outside the known buckets.
#[must_use]
pub fn split_group_key(key: &str) -> (&str, &str) {
    key.split_once('_').unwrap_or((key, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_age_maps_to_exactly_one_bucket() {
        for age in 0..=200 {
            let bucket = AgeBucket::from_age(age);
            assert_eq!(
                AgeBucket::ALL.iter().filter(|b| **b == bucket).count(),
                1,
                "age {age}"
            );
        }
        assert_eq!(AgeBucket::from_age(u32::MAX), AgeBucket::NinetiesPlus);
    }

    #[test]
    fn test_young_ages_fold_into_teens() {
        for age in 0..20 {
            assert_eq!(AgeBucket::from_age(age), AgeBucket::Teens);
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgeBucket::from_age(25), AgeBucket::Twenties);
        assert_eq!(AgeBucket::from_age(29), AgeBucket::Twenties);
        assert_eq!(AgeBucket::from_age(30), AgeBucket::Thirties);
        assert_eq!(AgeBucket::from_age(89), AgeBucket::Eighties);
        assert_eq!(AgeBucket::from_age(90), AgeBucket::NinetiesPlus);
    }

    #[test]
    fn test_labels() {
        assert_eq!(AgeBucket::Twenties.label(), "20-29");
        assert_eq!(AgeBucket::Twenties.label_with_suffix(), "20-29세");
        assert_eq!(AgeBucket::from_label("90+세"), Some(AgeBucket::NinetiesPlus));
        assert_eq!(AgeBucket::from_label("100-109"), None);
    }

    #[test]
    fn test_candidate_keys_try_suffix_first() {
        let group = ReferenceGroup::for_age(Gender::Male, 25);
        assert_eq!(
            group.candidate_keys(),
            ["M_20-29세".to_owned(), "M_20-29".to_owned()]
        );
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("m".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" F ".parse::<Gender>(), Ok(Gender::Female));
        assert!("X".parse::<Gender>().is_err());
        let gender: Gender = serde_json::from_str("\"f\"").unwrap();
        assert_eq!(gender, Gender::Female);
    }

    #[test]
    fn test_split_group_key_keeps_unknown_parts() {
        assert_eq!(split_group_key("M_20-29세"), ("M", "20-29세"));
        assert_eq!(split_group_key("unknown"), ("unknown", ""));
    }
}
