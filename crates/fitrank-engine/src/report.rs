//! Structured input for report generation, and a deterministic fallback.
//!
//! Report prose comes from an external text generator behind
//! [`ReportGenerator`]. When it fails, [`report_or_fallback`] substitutes a
//! fixed template so callers always get a report.

use std::{collections::BTreeMap, convert::Infallible, fmt};

use fitrank_reference::dimension::FitnessDimension;
use serde::{Serialize, Serializer};

use crate::{
    percentile::PercentileResult,
    persona::PersonaProfile,
    profile::{FitnessProfile, UserInfo},
};

/// Where an average percentile sits relative to the population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Standing {
    /// Top `n` percent, for averages of 50 and above.
    Top(f64),
    /// Bottom `n` percent.
    Bottom(f64),
}

impl Standing {
    #[must_use]
    pub fn from_average(average: f64) -> Self {
        if average >= 50.0 {
            Self::Top(100.0 - average)
        } else {
            Self::Bottom(average)
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top(p) => write!(f, "top {p:.1}%"),
            Self::Bottom(p) => write!(f, "bottom {p:.1}%"),
        }
    }
}

impl Serialize for Standing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything a report generator is given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub user_info: UserInfo,
    pub percentiles: BTreeMap<FitnessDimension, PercentileResult>,
    pub persona: PersonaProfile,
    pub average_score: f64,
    pub standing: Standing,
}

impl ReportSummary {
    #[must_use]
    pub fn new(profile: &FitnessProfile, persona: PersonaProfile) -> Self {
        let average_score = persona.average_score;
        Self {
            user_info: profile.user_info.clone(),
            percentiles: profile.percentiles.clone(),
            persona,
            average_score,
            standing: Standing::from_average(average_score),
        }
    }
}

/// Turns a [`ReportSummary`] into prose.
pub trait ReportGenerator {
    type Error: std::error::Error;

    fn generate(&self, summary: &ReportSummary) -> Result<String, Self::Error>;
}

/// Generator that always produces the [fallback report](fallback_report).
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReporter;

impl ReportGenerator for TemplateReporter {
    type Error = Infallible;

    fn generate(&self, summary: &ReportSummary) -> Result<String, Self::Error> {
        Ok(fallback_report(summary))
    }
}

#[must_use]
pub fn fallback_report(summary: &ReportSummary) -> String {
    let persona = &summary.persona;
    format!(
        "Your fitness assessment is complete!\n\
         \n\
         At {age}, you are '{name}' {emoji}\n\
         Your overall score is {score:.1} points ({standing}).\n\
         \n\
         Build on your strengths and keep improving the weaker areas\n\
         for a more balanced level of fitness.\n\
         \n\
         Ready to start a steady routine? You've got this! 💪",
        age = summary.user_info.age,
        name = persona.name,
        emoji = persona.emoji,
        score = summary.average_score,
        standing = summary.standing,
    )
}

/// Generates a report, falling back to [`fallback_report`] on failure.
pub fn report_or_fallback<G>(generator: &G, summary: &ReportSummary) -> String
where
    G: ReportGenerator + ?Sized,
{
    match generator.generate(summary) {
        Ok(report) => report,
        Err(err) => {
            tracing::warn!("Report generation failed, using fallback report: {err}");
            fallback_report(summary)
        }
    }
}
