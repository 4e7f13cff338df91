//! Weekly training focus derived from a stored percentile vector.

use fitrank_engine::persona::PercentileVector;
use fitrank_reference::dimension::FitnessDimension;
use serde::Serialize;

/// Instruction used when no analysis is available.
pub const DEFAULT_INSTRUCTION: &str = "Whole-body balance and base fitness";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingStrategy {
    /// Weakest performance dimension, if an analysis was available.
    pub focus: Option<FitnessDimension>,
    pub focus_score: Option<u8>,
    pub instruction: String,
}

const fn focus_label(dimension: FitnessDimension) -> &'static str {
    match dimension {
        FitnessDimension::Strength => "strength building",
        FitnessDimension::CardioEndurance => "cardio endurance",
        FitnessDimension::Core => "core stability",
        FitnessDimension::Flexibility => "flexibility",
        FitnessDimension::Agility => "agility drills",
        FitnessDimension::BodyComposition => "body composition",
    }
}

/// First dimension of `dimensions` with the lowest score.
pub(crate) fn weakest_of(
    analysis: &PercentileVector,
    dimensions: &[FitnessDimension],
) -> Option<FitnessDimension> {
    dimensions
        .iter()
        .copied()
        .reduce(|weakest, d| {
            if analysis.score(d) < analysis.score(weakest) {
                d
            } else {
                weakest
            }
        })
}

impl TrainingStrategy {
    /// Focuses the week on the weakest of the five performance dimensions.
    #[must_use]
    pub fn determine(analysis: Option<&PercentileVector>) -> Self {
        let Some((analysis, focus)) = analysis.and_then(|analysis| {
            weakest_of(analysis, &FitnessDimension::PERFORMANCE).map(|focus| (analysis, focus))
        }) else {
            return Self {
                focus: None,
                focus_score: None,
                instruction: DEFAULT_INSTRUCTION.to_owned(),
            };
        };
        let score = analysis.score(focus);
        let label = focus_label(focus);
        Self {
            focus: Some(focus),
            focus_score: Some(score),
            instruction: format!(
                "The analysis shows '{label}' (percentile {score}) as the weakest area. \
                 Give {label} a larger share of this week's routine."
            ),
        }
    }
}
