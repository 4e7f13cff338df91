//! Population measurement data used to build reference tables.
//!
//! The input is a CSV export of the national fitness survey: one row per
//! subject, a grouping column ([`GROUP_COLUMN`]) holding the group key and
//! one column per measurement code. Only the canonical column of each
//! [`FitnessDimension`] is read.
//!
//! Empty cells, non-numeric cells and `NaN` are treated as missing values.
//! Rows with an empty group key are dropped.

use std::{
    collections::BTreeMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::dimension::FitnessDimension;

/// Column holding the `gender_ageBucket` group key.
pub const GROUP_COLUMN: &str = "GENDER_AGE_GROUP";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PopulationError {
    #[display("population data is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[display("failed to open population file {}", path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to read population CSV")]
    Csv(#[error(source)] csv::Error),
}

/// One subject's canonical measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRow {
    pub group_key: String,
    pub measurements: BTreeMap<FitnessDimension, f64>,
}

impl PopulationRow {
    /// Measured value for `dimension`, if present.
    #[must_use]
    pub fn value(&self, dimension: FitnessDimension) -> Option<f64> {
        self.measurements.get(&dimension).copied()
    }
}

/// All population rows of a survey export.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    pub rows: Vec<PopulationRow>,
}

impl PopulationTable {
    /// Reads a population CSV file.
    pub fn from_csv_path<P>(path: P) -> Result<Self, PopulationError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PopulationError::Open {
            path: path.to_owned(),
            source,
        })?;
        Self::from_csv_reader(io::BufReader::new(file))
    }

    /// Reads population CSV data.
    ///
    /// The header is validated before any row is read: if the group column
    /// or any canonical measurement column is absent, nothing is parsed.
    pub fn from_csv_reader<R>(reader: R) -> Result<Self, PopulationError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers().map_err(PopulationError::Csv)?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == name)
        };

        let mut missing = vec![];
        let group_index = position(GROUP_COLUMN);
        if group_index.is_none() {
            missing.push(GROUP_COLUMN.to_owned());
        }
        let mut dimension_indices = vec![];
        for dimension in FitnessDimension::ALL {
            let column = dimension.canonical_column();
            match position(column) {
                Some(index) => dimension_indices.push((dimension, index)),
                None => missing.push(column.to_owned()),
            }
        }
        let Some(group_index) = group_index.filter(|_| missing.is_empty()) else {
            return Err(PopulationError::MissingColumns { columns: missing });
        };

        let mut rows = vec![];
        for record in reader.records() {
            let record = record.map_err(PopulationError::Csv)?;
            let group_key = record.get(group_index).unwrap_or_default().trim();
            if group_key.is_empty() {
                continue;
            }
            let measurements = dimension_indices
                .iter()
                .filter_map(|&(dimension, index)| {
                    parse_measurement(record.get(index)?).map(|value| (dimension, value))
                })
                .collect();
            rows.push(PopulationRow {
                group_key: group_key.to_owned(),
                measurements,
            });
        }
        tracing::info!("Loaded {} population rows", rows.len());

        Ok(Self { rows })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_measurement(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
