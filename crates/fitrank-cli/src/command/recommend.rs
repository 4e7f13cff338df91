use clap::Args;
use fitrank_engine::persona::PercentileVector;
use fitrank_routine::{
    candidate::{self, TrainingContext},
    exercise::ExerciseId,
    recommend,
    strategy::TrainingStrategy,
};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    command::TrainingArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct RecommendArg {
    #[clap(flatten)]
    training: TrainingArg,
    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RecommendOutput {
    seed: u64,
    candidates: usize,
    strategy: TrainingStrategy,
    exercises: Vec<ExerciseId>,
}

pub(crate) fn run(arg: &RecommendArg) -> anyhow::Result<()> {
    let TrainingArg {
        catalog,
        context,
        analysis,
    } = &arg.training;
    let catalog = util::read_catalog_file(catalog)?;
    let context: TrainingContext = util::read_json_file("training context", context)?;
    let analysis: Option<PercentileVector> = analysis
        .as_ref()
        .map(|path| util::read_json_file("percentile vector", path))
        .transpose()?;

    let candidates = candidate::filter_candidates(&catalog, &context);
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = Pcg32::seed_from_u64(seed);
    let exercises = recommend::instant_recommendations(&candidates, analysis.as_ref(), &mut rng);

    Output::save_json(
        &RecommendOutput {
            seed,
            candidates: candidates.len(),
            strategy: TrainingStrategy::determine(analysis.as_ref()),
            exercises,
        },
        None,
    )
}
