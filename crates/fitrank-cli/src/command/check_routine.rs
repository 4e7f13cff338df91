use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Args;
use fitrank_engine::persona::PercentileVector;
use fitrank_routine::{
    candidate::{self, TrainingContext},
    exercise::Exercise,
    routine::{self, DayThumbnail, RoutinePlanner, WeeklyRoutine},
    strategy::TrainingStrategy,
};
use serde::Serialize;

use crate::{
    command::TrainingArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CheckRoutineArg {
    #[clap(flatten)]
    training: TrainingArg,
    /// Path to the weekly routine JSON file produced by a planner
    routine: PathBuf,
}

/// Planner whose routine was produced ahead of time and saved to a file.
#[derive(Debug)]
struct SavedRoutine {
    path: PathBuf,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
enum ReadRoutineError {
    #[display("failed to open routine file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse routine file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RoutinePlanner for SavedRoutine {
    type Error = ReadRoutineError;

    fn plan(
        &self,
        _context: &TrainingContext,
        _candidates: &[Exercise],
        _strategy: &TrainingStrategy,
    ) -> Result<WeeklyRoutine, Self::Error> {
        let file = File::open(&self.path).map_err(|source| ReadRoutineError::Open {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ReadRoutineError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

#[derive(Debug, Serialize)]
struct CheckRoutineOutput {
    strategy: TrainingStrategy,
    thumbnails: Vec<DayThumbnail>,
    routine: WeeklyRoutine,
}

pub(crate) fn run(arg: &CheckRoutineArg) -> anyhow::Result<()> {
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
    anyhow::ensure!(
        !candidates.is_empty(),
        "No exercise in the catalog suits this training context"
    );
    let strategy = TrainingStrategy::determine(analysis.as_ref());
    let planner = SavedRoutine {
        path: arg.routine.clone(),
    };
    let weekly = routine::plan_weekly_routine(&planner, &context, &candidates, &strategy)
        .context("Weekly routine rejected")?;

    Output::save_json(
        &CheckRoutineOutput {
            thumbnails: weekly.thumbnails(&candidates),
            strategy,
            routine: weekly,
        },
        None,
    )
}
