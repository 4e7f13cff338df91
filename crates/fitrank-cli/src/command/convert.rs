use std::path::PathBuf;

use clap::Args;
use fitrank_reference::group::Gender;

use crate::util::{self, Output};

#[derive(Debug, Clone, Args)]
pub(crate) struct ConvertArg {
    /// Test name, e.g. plank or push_up
    #[arg(long)]
    test: String,
    /// Raw test result
    #[arg(long, allow_negative_numbers = true)]
    value: f64,
    /// M or F
    #[arg(long)]
    gender: Gender,
    #[arg(long)]
    age: u32,
    /// Path to a conversion table JSON file replacing the built-in rules
    #[arg(long)]
    conversions: Option<PathBuf>,
}

pub(crate) fn run(arg: &ConvertArg) -> anyhow::Result<()> {
    let conversions = util::load_conversions(arg.conversions.as_deref())?;
    let conversion = conversions.convert(&arg.test, arg.value, arg.gender, arg.age)?;
    Output::save_json(&conversion, None)
}
