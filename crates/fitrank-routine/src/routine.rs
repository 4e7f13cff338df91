//! Weekly routines produced by an external planner.
//!
//! A [`RoutinePlanner`] designs the week from the user's context, the
//! candidate exercises and the training strategy. Planners are not trusted:
//! [`plan_weekly_routine`] validates every routine before returning it.

use std::{
    collections::{BTreeSet, HashMap},
    error::Error,
    fmt,
};

use serde::{Deserialize, Serialize};

use crate::{
    candidate::TrainingContext,
    exercise::{Exercise, ExerciseId},
    strategy::TrainingStrategy,
};

pub const DAYS_PER_WEEK: u8 = 7;

/// Thumbnail for a day without any exercise image.
pub const DEFAULT_IMAGE_URL: &str =
    "https://mofit-image.s3.ap-northeast-2.amazonaws.com/exercises/1.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub exercise_id: ExerciseId,
    /// Position within the day, starting at 1.
    pub order: u32,
    #[serde(default)]
    pub recommended_reps: Option<u32>,
    #[serde(default)]
    pub recommended_sets: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutine {
    /// Day of the week, 1 to 7.
    pub day: u8,
    pub title: String,
    pub description: String,
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyRoutine {
    pub routines: Vec<DailyRoutine>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RoutineError {
    #[display("a weekly routine must have 7 days, got {count}")]
    DayCount { count: usize },
    #[display("day {day} is outside 1..=7")]
    DayOutOfRange { day: u8 },
    #[display("day {day} appears more than once")]
    DuplicateDay { day: u8 },
    #[display("day {day} has no exercises")]
    EmptyDay { day: u8 },
    #[display("day {day} uses exercise {exercise_id}, which is not a candidate")]
    UnknownExercise { day: u8, exercise_id: ExerciseId },
}

/// Thumbnail chosen for one day of a routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayThumbnail {
    pub day: u8,
    pub image: String,
}

impl WeeklyRoutine {
    /// Checks that the routine covers each day once and only uses `candidates`.
    pub fn validate(&self, candidates: &[Exercise]) -> Result<(), RoutineError> {
        let count = self.routines.len();
        if count != usize::from(DAYS_PER_WEEK) {
            return Err(RoutineError::DayCount { count });
        }
        let known: BTreeSet<ExerciseId> = candidates.iter().map(|e| e.id).collect();
        let mut seen = BTreeSet::new();
        for daily in &self.routines {
            let day = daily.day;
            if !(1..=DAYS_PER_WEEK).contains(&day) {
                return Err(RoutineError::DayOutOfRange { day });
            }
            if !seen.insert(day) {
                return Err(RoutineError::DuplicateDay { day });
            }
            if daily.exercises.is_empty() {
                return Err(RoutineError::EmptyDay { day });
            }
            if let Some(item) = daily
                .exercises
                .iter()
                .find(|item| !known.contains(&item.exercise_id))
            {
                return Err(RoutineError::UnknownExercise {
                    day,
                    exercise_id: item.exercise_id,
                });
            }
        }
        Ok(())
    }

    /// Image of each day's first exercise that has one, else [`DEFAULT_IMAGE_URL`].
    #[must_use]
    pub fn thumbnails(&self, candidates: &[Exercise]) -> Vec<DayThumbnail> {
        let images: HashMap<ExerciseId, &str> = candidates
            .iter()
            .filter_map(|e| Some((e.id, e.image.as_deref().filter(|i| !i.is_empty())?)))
            .collect();
        self.routines
            .iter()
            .map(|daily| {
                let image = daily
                    .exercises
                    .iter()
                    .find_map(|item| images.get(&item.exercise_id).copied())
                    .unwrap_or(DEFAULT_IMAGE_URL);
                DayThumbnail {
                    day: daily.day,
                    image: image.to_owned(),
                }
            })
            .collect()
    }
}

/// Designs a weekly routine.
pub trait RoutinePlanner {
    type Error: Error;

    fn plan(
        &self,
        context: &TrainingContext,
        candidates: &[Exercise],
        strategy: &TrainingStrategy,
    ) -> Result<WeeklyRoutine, Self::Error>;
}

#[derive(Debug)]
pub enum PlanError<E> {
    Planner(E),
    Invalid(RoutineError),
}

impl<E: fmt::Display> fmt::Display for PlanError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planner(err) => write!(f, "routine planner failed: {err}"),
            Self::Invalid(err) => write!(f, "planner returned an invalid routine: {err}"),
        }
    }
}

impl<E: Error + 'static> Error for PlanError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Planner(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

/// Runs `planner` and validates its routine against `candidates`.
pub fn plan_weekly_routine<P>(
    planner: &P,
    context: &TrainingContext,
    candidates: &[Exercise],
    strategy: &TrainingStrategy,
) -> Result<WeeklyRoutine, PlanError<P::Error>>
where
    P: RoutinePlanner + ?Sized,
{
    let routine = planner
        .plan(context, candidates, strategy)
        .map_err(PlanError::Planner)?;
    routine.validate(candidates).map_err(PlanError::Invalid)?;
    tracing::info!(
        "Planned weekly routine with {} exercises",
        routine
            .routines
            .iter()
            .map(|d| d.exercises.len())
            .sum::<usize>()
    );
    Ok(routine)
}
