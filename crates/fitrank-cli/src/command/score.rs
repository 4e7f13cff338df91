use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use fitrank_engine::{
    persona::{self, PersonaProfile},
    profile::{FitnessProfile, UserData},
    report::{self, ReportSummary, TemplateReporter},
};
use serde::Serialize;

use crate::{
    command::TablesArg,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct ScoreArg {
    #[clap(flatten)]
    tables: TablesArg,
    /// Path to the user data JSON file
    input: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    profile: FitnessProfile,
    persona: PersonaProfile,
    report: String,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let assessor = util::load_assessor(&arg.tables.reference, arg.tables.conversions.as_deref())?;
    let user: UserData = util::read_json_file("user data", &arg.input)?;
    let user = user.validate().context("Invalid user data")?;

    let profile = assessor.build_profile(&user);
    let persona = persona::classify(&profile.percentile_vector());
    let summary = ReportSummary::new(&profile, persona.clone());
    let report = report::report_or_fallback(&TemplateReporter, &summary);
    tracing::info!(
        "Classified as {} with average score {}",
        persona.archetype.id(),
        persona.average_score
    );

    Output::save_json(
        &ScoreOutput {
            profile,
            persona,
            report,
        },
        arg.output.as_deref(),
    )
}
