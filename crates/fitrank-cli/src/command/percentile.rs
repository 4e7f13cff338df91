use anyhow::Context as _;
use clap::Args;
use fitrank_reference::{dimension::FitnessDimension, group::Gender};

use crate::{
    command::TablesArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct PercentileArg {
    #[clap(flatten)]
    tables: TablesArg,
    /// M or F
    #[arg(long)]
    gender: Gender,
    #[arg(long)]
    age: u32,
    /// Dimension id of a value already in reference-test units
    #[arg(long, required_unless_present = "test", conflicts_with = "test")]
    dimension: Option<FitnessDimension>,
    /// User test the raw value comes from, e.g. plank
    #[arg(long)]
    test: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    value: f64,
}

pub(crate) fn run(arg: &PercentileArg) -> anyhow::Result<()> {
    let assessor = util::load_assessor(&arg.tables.reference, arg.tables.conversions.as_deref())?;
    if let Some(test) = &arg.test {
        let result = assessor.compute_percentile(test, arg.value, arg.gender, arg.age)?;
        return Output::save_json(&result, None);
    }
    let dimension = arg.dimension.context("Either --dimension or --test is required")?;
    let result = assessor.percentile_of(arg.gender, arg.age, dimension, arg.value);
    Output::save_json(&result, None)
}
