use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use clap::Args;
use fitrank_reference::{builder, population::PopulationTable};

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct BuildTableArg {
    /// Path to the population CSV file
    population: PathBuf,
    /// Output file path for the reference table JSON
    #[arg(long)]
    output: Option<PathBuf>,
    /// Output file path for the flat CSV form
    #[arg(long)]
    flat_output: Option<PathBuf>,
}

pub(crate) fn run(arg: &BuildTableArg) -> anyhow::Result<()> {
    let BuildTableArg {
        population,
        output,
        flat_output,
    } = arg;

    let population = PopulationTable::from_csv_path(population)
        .context("Failed to load population data")?;
    let build = builder::build_reference_table(&population);
    if !build.skipped.is_empty() {
        tracing::warn!(
            "{} group/dimension pairs had too few samples and were left out",
            build.skipped.len()
        );
    }

    Output::save_json(&build.table, output.as_deref())?;

    if let Some(path) = flat_output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        build
            .table
            .write_csv(BufWriter::new(file))
            .with_context(|| format!("Failed to write flat CSV to {}", path.display()))?;
        tracing::info!("Wrote {} flat rows to {}", build.rows.len(), path.display());
    }
    Ok(())
}
