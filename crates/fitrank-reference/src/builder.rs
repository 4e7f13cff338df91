//! Offline construction of a [`ReferenceTable`] from population data.
//!
//! For every group key observed in the population and every
//! [`FitnessDimension`], the builder drops subjects without a measurement,
//! and either computes [`ComponentStats`] from the remaining values or, if
//! fewer than [`MIN_SAMPLES`] remain, skips the pair and records it in
//! [`TableBuild::skipped`].
//!
//! Groups are emitted even when every dimension was skipped.

use std::collections::BTreeMap;

use fitrank_stats::summary::SummaryStats;

use crate::{
    dimension::FitnessDimension,
    population::{PopulationRow, PopulationTable},
    table::{ANCHOR_RANKS, ComponentStats, FlatStatsRow, GroupStats, ReferenceTable},
};

/// Minimum number of measured subjects for a group/dimension pair.
pub const MIN_SAMPLES: usize = 10;

/// A group/dimension pair left out of the table for lack of data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPair {
    pub group_key: String,
    pub dimension: FitnessDimension,
    pub count: usize,
}

/// Output of [`build_reference_table`].
#[derive(Debug, Clone)]
pub struct TableBuild {
    /// The reference document.
    pub table: ReferenceTable,
    /// The same data, one row per group and dimension.
    pub rows: Vec<FlatStatsRow>,
    pub skipped: Vec<SkippedPair>,
}

/// Builds the percentile reference table from population rows.
#[must_use]
pub fn build_reference_table(population: &PopulationTable) -> TableBuild {
    let mut grouped: BTreeMap<&str, Vec<&PopulationRow>> = BTreeMap::new();
    for row in &population.rows {
        grouped.entry(row.group_key.as_str()).or_default().push(row);
    }

    let total_groups = grouped.len();
    let mut groups = BTreeMap::new();
    let mut skipped = vec![];
    for (index, (group_key, rows)) in grouped.into_iter().enumerate() {
        tracing::info!(
            "Processing {group_key} ({}/{total_groups}) - {} rows",
            index + 1,
            rows.len()
        );
        let mut group_stats = GroupStats::new();
        for dimension in FitnessDimension::ALL {
            let values = rows.iter().filter_map(|row| row.value(dimension));
            match component_stats(values) {
                Ok(stats) => {
                    group_stats.insert(dimension, stats);
                }
                Err(count) => {
                    tracing::warn!(
                        "{group_key} - insufficient {dimension} data ({count} samples), skipped"
                    );
                    skipped.push(SkippedPair {
                        group_key: group_key.to_owned(),
                        dimension,
                        count,
                    });
                }
            }
        }
        groups.insert(group_key.to_owned(), group_stats);
    }

    let table = ReferenceTable::new(groups);
    let rows = table.flat_rows();
    tracing::info!(
        "Built {} groups, {} records, {} pairs skipped",
        table.len(),
        rows.len(),
        skipped.len()
    );
    TableBuild {
        table,
        rows,
        skipped,
    }
}

/// Computes stats for one group/dimension, or returns the sample count if too small.
fn component_stats<I>(values: I) -> Result<ComponentStats, usize>
where
    I: IntoIterator<Item = f64>,
{
    let values = values.into_iter().collect::<Vec<_>>();
    if values.len() < MIN_SAMPLES {
        return Err(values.len());
    }
    let points = ANCHOR_RANKS.map(f64::from);
    SummaryStats::new(values.iter().copied(), &points)
        .as_ref()
        .and_then(ComponentStats::from_summary)
        .ok_or(values.len())
}
