use std::{io, path::PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    build_table::BuildTableArg, check_routine::CheckRoutineArg, classify::ClassifyArg,
    columns::ColumnsArg, convert::ConvertArg, percentile::PercentileArg,
    recommend::RecommendArg, score::ScoreArg,
};

mod build_table;
mod check_routine;
mod classify;
mod columns;
mod convert;
mod percentile;
mod recommend;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug messages
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build the percentile reference table from population data
    BuildTable(#[clap(flatten)] BuildTableArg),
    /// Convert a test result into reference-test units
    Convert(#[clap(flatten)] ConvertArg),
    /// Look up the percentile of a converted value
    Percentile(#[clap(flatten)] PercentileArg),
    /// Build a user's profile, persona and report
    Score(#[clap(flatten)] ScoreArg),
    /// Classify a percentile vector into a persona
    Classify(#[clap(flatten)] ClassifyArg),
    /// Pick instant exercise recommendations
    Recommend(#[clap(flatten)] RecommendArg),
    /// Validate a planned weekly routine
    CheckRoutine(#[clap(flatten)] CheckRoutineArg),
    /// Show which survey columns describe each dimension
    Columns(#[clap(flatten)] ColumnsArg),
}

/// Reference table and conversion rules used at request time.
#[derive(Debug, Clone, Args)]
pub(crate) struct TablesArg {
    /// Path to the reference table JSON file
    #[arg(long, env = "FITRANK_REFERENCE_PATH")]
    reference: PathBuf,
    /// Path to a conversion table JSON file replacing the built-in rules
    #[arg(long)]
    conversions: Option<PathBuf>,
}

/// Exercise catalog and training context shared by the routine commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct TrainingArg {
    /// Path to the exercise catalog JSON file
    #[arg(long)]
    catalog: PathBuf,
    /// Path to the training context JSON file
    #[arg(long)]
    context: PathBuf,
    /// Path to a percentile vector JSON file from a previous analysis
    #[arg(long)]
    analysis: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::BuildTable(arg) => build_table::run(&arg)?,
        Mode::Convert(arg) => convert::run(&arg)?,
        Mode::Percentile(arg) => percentile::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
        Mode::Classify(arg) => classify::run(&arg)?,
        Mode::Recommend(arg) => recommend::run(&arg)?,
        Mode::CheckRoutine(arg) => check_routine::run(&arg)?,
        Mode::Columns(arg) => columns::run(&arg)?,
    }
    Ok(())
}
