use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use clap::Args;
use fitrank_reference::dimension::{self, FitnessDimension};

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct ColumnsArg {
    /// Only list columns present in this population CSV file
    population: Option<PathBuf>,
}

pub(crate) fn run(arg: &ColumnsArg) -> anyhow::Result<()> {
    let columns: BTreeMap<FitnessDimension, Vec<&str>> = match &arg.population {
        Some(path) => {
            let mut reader = csv::Reader::from_path(path)
                .with_context(|| format!("Failed to open population file: {}", path.display()))?;
            let headers = reader
                .headers()
                .with_context(|| format!("Failed to read CSV header: {}", path.display()))?;
            dimension::available_columns(headers.iter().map(|h| h.trim_start_matches('\u{feff}')))
        }
        None => FitnessDimension::ALL
            .into_iter()
            .map(|d| (d, dimension::columns_of(d).to_vec()))
            .collect(),
    };
    Output::save_json(&columns, None)
}
