//! Filtering the catalog down to exercises a user can safely do.

use serde::{Deserialize, Serialize};

use crate::exercise::{Difficulty, Exercise};

/// Equipment not available at home.
pub const HOME_EXCLUDED_EQUIPMENT: [&str; 4] = ["MACHINE", "PULL_UP_BAR", "BARBELL", "BENCH"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Place {
    Home,
    Gym,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

/// Where and how a user trains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingContext {
    pub place: Place,
    pub proficiency: Proficiency,
    #[serde(default)]
    pub injuries: Vec<String>,
}

impl TrainingContext {
    #[must_use]
    pub fn allows(&self, exercise: &Exercise) -> bool {
        if self.place == Place::Home
            && HOME_EXCLUDED_EQUIPMENT
                .iter()
                .any(|code| exercise.uses_equipment(code))
        {
            return false;
        }
        if self
            .injuries
            .iter()
            .any(|injury| exercise.is_restricted_for(injury))
        {
            return false;
        }
        !(self.proficiency == Proficiency::Beginner && exercise.difficulty == Difficulty::Hard)
    }
}

/// Catalog entries allowed by `context`, in catalog order.
#[must_use]
pub fn filter_candidates(catalog: &[Exercise], context: &TrainingContext) -> Vec<Exercise> {
    let candidates: Vec<Exercise> = catalog
        .iter()
        .filter(|exercise| context.allows(exercise))
        .cloned()
        .collect();
    tracing::debug!(
        "{} of {} exercises are candidates",
        candidates.len(),
        catalog.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::tests::exercise;

    fn context(place: Place, proficiency: Proficiency, injuries: &[&str]) -> TrainingContext {
        TrainingContext {
            place,
            proficiency,
            injuries: injuries.iter().map(|&i| i.to_owned()).collect(),
        }
    }

    fn catalog() -> Vec<Exercise> {
        let mut bench_press = exercise(1, "strength", "STRENGTH");
        bench_press.equipment = "BARBELL,BENCH".to_owned();
        let mut lunge = exercise(2, "agility", "STRENGTH");
        lunge.restricts = vec!["KNEE".to_owned()];
        let mut burpee = exercise(3, "cardio_endurance", "CARDIO");
        burpee.difficulty = Difficulty::Hard;
        let mut curl = exercise(4, "strength", "STRENGTH");
        curl.equipment = "DUMBBELL".to_owned();
        let mut pull_up = exercise(5, "strength", "STRENGTH");
        pull_up.equipment = "pull_up_bar".to_owned();
        vec![bench_press, lunge, burpee, curl, pull_up]
    }

    fn ids(exercises: &[Exercise]) -> Vec<u64> {
        exercises.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_gym_advanced_keeps_everything() {
        let ctx = context(Place::Gym, Proficiency::Advanced, &[]);
        assert_eq!(ids(&filter_candidates(&catalog(), &ctx)), [1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_home_excludes_gym_equipment() {
        let ctx = context(Place::Home, Proficiency::Advanced, &[]);
        assert_eq!(ids(&filter_candidates(&catalog(), &ctx)), [2, 3, 4]);
    }

    #[test]
    fn test_injury_restrictions_apply() {
        let ctx = context(Place::Gym, Proficiency::Intermediate, &["KNEE", "WRIST"]);
        assert_eq!(ids(&filter_candidates(&catalog(), &ctx)), [1, 3, 4, 5]);
    }

    #[test]
    fn test_beginner_never_gets_hard_exercises() {
        let ctx = context(Place::Home, Proficiency::Beginner, &["KNEE"]);
        assert_eq!(ids(&filter_candidates(&catalog(), &ctx)), [4]);
    }
}
