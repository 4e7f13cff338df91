use std::path::PathBuf;

use clap::Args;
use fitrank_engine::persona::{self, PercentileVector};

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ClassifyArg {
    /// Path to a percentile vector JSON file
    input: PathBuf,
}

pub(crate) fn run(arg: &ClassifyArg) -> anyhow::Result<()> {
    let percentiles: PercentileVector = util::read_json_file("percentile vector", &arg.input)?;
    Output::save_json(&persona::classify(&percentiles), None)
}
