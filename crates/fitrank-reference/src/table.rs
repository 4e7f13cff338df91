//! The percentile reference table and its serialized forms.
//!
//! # Document format
//!
//! ```json
//! {
//!   "M_20-29세": {
//!     "strength": {
//!       "p5": 31.2, "p10": 34.0, "p25": 38.9, "p50": 44.1,
//!       "p75": 49.3, "p90": 54.0, "p95": 57.1,
//!       "mean": 44.0, "std": 7.9, "count": 12034
//!     }
//!   }
//! }
//! ```
//!
//! Documents keyed by the national-survey dimension labels load as well.
//!
//! The table is read-only once built or loaded. It is plain data, so a
//! single instance can be shared by reference across threads.

use std::{
    collections::BTreeMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use fitrank_stats::{interpolation::RankAnchors, summary::SummaryStats};
use serde::{Deserialize, Serialize};

use crate::{
    dimension::FitnessDimension,
    group::{ReferenceGroup, split_group_key},
};

/// Percentile ranks stored for every group and dimension.
pub const ANCHOR_RANKS: [u8; 7] = [5, 10, 25, 50, 75, 90, 95];

/// Percentile anchors and moments of one dimension within one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStats {
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl ComponentStats {
    /// Extracts the stored fields from summary statistics.
    ///
    /// Returns `None` if `summary` lacks one of the [`ANCHOR_RANKS`].
    #[must_use]
    pub fn from_summary(summary: &SummaryStats) -> Option<Self> {
        let p = |rank: u8| summary.percentiles.get(f64::from(rank));
        Some(Self {
            p5: p(5)?,
            p10: p(10)?,
            p25: p(25)?,
            p50: p(50)?,
            p75: p(75)?,
            p90: p(90)?,
            p95: p(95)?,
            mean: summary.stats.mean,
            std: summary.stats.std_dev,
            count: summary.stats.count,
        })
    }

    /// Anchor values in the order of [`ANCHOR_RANKS`].
    #[must_use]
    pub fn anchors(&self) -> [f64; 7] {
        [
            self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95,
        ]
    }

    #[must_use]
    pub fn rank_anchors(&self) -> RankAnchors {
        RankAnchors::from_arrays(ANCHOR_RANKS.map(f64::from), self.anchors())
    }
}

/// Statistics of every dimension computed for one group.
pub type GroupStats = BTreeMap<FitnessDimension, ComponentStats>;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadTableError {
    #[display("failed to open reference table {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse reference table {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Group key → dimension → statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    groups: BTreeMap<String, GroupStats>,
}

/// A group found in a [`ReferenceTable`], with the key it was found under.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedGroup<'a> {
    pub key: &'a str,
    pub stats: &'a GroupStats,
}

impl ResolvedGroup<'_> {
    #[must_use]
    pub fn dimension(&self, dimension: FitnessDimension) -> Option<&ComponentStats> {
        self.stats.get(&dimension)
    }
}

/// A group absent from a [`ReferenceTable`] under every candidate key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedGroup {
    /// Last key that was tried.
    pub attempted_key: String,
}

impl ReferenceTable {
    #[must_use]
    pub fn new(groups: BTreeMap<String, GroupStats>) -> Self {
        Self { groups }
    }

    /// Loads a reference document from a JSON file.
    pub fn load<P>(path: P) -> Result<Self, LoadTableError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadTableError::Open {
            path: path.to_owned(),
            source,
        })?;
        let table: Self = serde_json::from_reader(io::BufReader::new(file)).map_err(|source| {
            LoadTableError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        tracing::info!(
            "Loaded reference table with {} groups from {}",
            table.groups.len(),
            path.display()
        );
        Ok(table)
    }

    #[must_use]
    pub fn group(&self, key: &str) -> Option<&GroupStats> {
        self.groups.get(key)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupStats)> + '_ {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finds `group` by trying its [candidate keys](ReferenceGroup::candidate_keys) in order.
    pub fn resolve(&self, group: ReferenceGroup) -> Result<ResolvedGroup<'_>, UnresolvedGroup> {
        let mut attempted_key = String::new();
        for (attempt, key) in group.candidate_keys().into_iter().enumerate() {
            if let Some((key, stats)) = self.groups.get_key_value(&key) {
                if attempt > 0 {
                    tracing::debug!("Reference group resolved by fallback key {key}");
                }
                return Ok(ResolvedGroup { key, stats });
            }
            attempted_key = key;
        }
        Err(UnresolvedGroup { attempted_key })
    }

    /// Flattens the table into one row per group and dimension.
    #[must_use]
    pub fn flat_rows(&self) -> Vec<FlatStatsRow> {
        self.groups
            .iter()
            .flat_map(|(key, stats)| {
                stats
                    .iter()
                    .map(|(dimension, stats)| FlatStatsRow::new(key, *dimension, stats))
            })
            .collect()
    }

    /// Writes the flat form as CSV.
    pub fn write_csv<W>(&self, writer: W) -> Result<(), csv::Error>
    where
        W: io::Write,
    {
        let mut writer = csv::Writer::from_writer(writer);
        for row in self.flat_rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// One group × dimension record of the flat inspection form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatStatsRow {
    pub gender: String,
    pub age_group: String,
    pub dimension: FitnessDimension,
    pub column_name: String,
    pub p5: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
}

impl FlatStatsRow {
    fn new(group_key: &str, dimension: FitnessDimension, stats: &ComponentStats) -> Self {
        let (gender, age_group) = split_group_key(group_key);
        Self {
            gender: gender.to_owned(),
            age_group: age_group.to_owned(),
            dimension,
            column_name: dimension.canonical_column().to_owned(),
            p5: stats.p5,
            p10: stats.p10,
            p25: stats.p25,
            p50: stats.p50,
            p75: stats.p75,
            p90: stats.p90,
            p95: stats.p95,
            mean: stats.mean,
            std: stats.std,
            count: stats.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{AgeBucket, Gender};

    fn stats(base: f64) -> ComponentStats {
        ComponentStats {
            p5: base,
            p10: base + 5.0,
            p25: base + 10.0,
            p50: base + 18.0,
            p75: base + 25.0,
            p90: base + 32.0,
            p95: base + 38.0,
            mean: base + 18.0,
            std: 9.0,
            count: 120,
        }
    }

    fn table() -> ReferenceTable {
        let mut groups = BTreeMap::new();
        groups.insert(
            "M_20-29세".to_owned(),
            GroupStats::from([(FitnessDimension::Strength, stats(20.0))]),
        );
        groups.insert(
            "F_30-39".to_owned(),
            GroupStats::from([(FitnessDimension::Core, stats(5.0))]),
        );
        ReferenceTable::new(groups)
    }

    mod resolve {
        use super::*;

        #[test]
        fn test_suffixed_key_is_preferred() {
            let table = table();
            let group = ReferenceGroup::for_age(Gender::Male, 25);
            let resolved = table.resolve(group).unwrap();
            assert_eq!(resolved.key, "M_20-29세");
            assert!(resolved.dimension(FitnessDimension::Strength).is_some());
            assert!(resolved.dimension(FitnessDimension::Core).is_none());
        }

        #[test]
        fn test_falls_back_to_plain_key() {
            let table = table();
            let group = ReferenceGroup::new(Gender::Female, AgeBucket::Thirties);
            assert_eq!(table.resolve(group).unwrap().key, "F_30-39");
        }

        #[test]
        fn test_unresolved_group_reports_last_attempt() {
            let table = table();
            let group = ReferenceGroup::new(Gender::Female, AgeBucket::Seventies);
            assert_eq!(
                table.resolve(group).unwrap_err(),
                UnresolvedGroup {
                    attempted_key: "F_70-79".to_owned()
                }
            );
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_document_shape() {
            let json = serde_json::to_value(table()).unwrap();
            assert_eq!(json["M_20-29세"]["strength"]["p50"], 38.0);
            assert_eq!(json["M_20-29세"]["strength"]["count"], 120);
        }

        #[test]
        fn test_survey_labelled_document_loads() {
            let json = r#"{
                "M_20-29세": {
                    "근력": {
                        "p5": 20.0, "p10": 25.0, "p25": 30.0, "p50": 38.0,
                        "p75": 45.0, "p90": 52.0, "p95": 58.0,
                        "mean": 38.2, "std": 11.4, "count": 512
                    }
                }
            }"#;
            let table: ReferenceTable = serde_json::from_str(json).unwrap();
            let group = table.group("M_20-29세").unwrap();
            assert_eq!(group[&FitnessDimension::Strength].p95, 58.0);
        }

        #[test]
        fn test_flat_rows_split_group_key() {
            let rows = table().flat_rows();
            assert_eq!(rows.len(), 2);
            let male = rows.iter().find(|r| r.gender == "M").unwrap();
            assert_eq!(male.age_group, "20-29세");
            assert_eq!(male.column_name, "MESURE_IEM_008_VALUE");
        }

        #[test]
        fn test_csv_has_header_and_one_line_per_row() {
            let mut buf = vec![];
            table().write_csv(&mut buf).unwrap();
            let text = String::from_utf8(buf).unwrap();
            let mut lines = text.lines();
            assert_eq!(
                lines.next(),
                Some("gender,age_group,dimension,column_name,p5,p10,p25,p50,p75,p90,p95,mean,std,count")
            );
            assert_eq!(lines.count(), 2);
        }

        #[test]
        fn test_load_reports_missing_file() {
            let err = ReferenceTable::load("/nonexistent/reference.json").unwrap_err();
            assert!(matches!(err, LoadTableError::Open { .. }));
        }
    }

    #[test]
    fn test_anchor_order_matches_ranks() {
        let stats = stats(0.0);
        let pairs = stats.rank_anchors().iter().collect::<Vec<_>>();
        assert_eq!(pairs[0], (5.0, 0.0));
        assert_eq!(pairs[3], (50.0, 18.0));
        assert_eq!(pairs[6], (95.0, 38.0));
    }
}
