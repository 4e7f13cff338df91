use fitrank_reference::dimension::FitnessDimension;
use serde::{Deserialize, Serialize};

pub type ExerciseId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[serde(alias = "MEDIUM")]
    Normal,
    Hard,
}

/// One entry of the exercise catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    /// Free-form body area or fitness component, e.g. `core` or `코어`.
    pub target_area: String,
    pub difficulty: Difficulty,
    /// Comma-separated equipment codes, e.g. `DUMBBELL,BENCH`. Empty for body weight.
    #[serde(default)]
    pub equipment: String,
    /// Exercise type, e.g. `CARDIO` or `STRENGTH`.
    pub kind: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Injury codes for which this exercise is unsafe.
    #[serde(default)]
    pub restricts: Vec<String>,
}

impl Exercise {
    /// Whether [`Self::target_area`] names `dimension`, by id or by survey label.
    #[must_use]
    pub fn targets(&self, dimension: FitnessDimension) -> bool {
        let area = self.target_area.to_lowercase();
        area.contains(dimension.id()) || area.contains(dimension.survey_label())
    }

    #[must_use]
    pub fn is_cardio(&self) -> bool {
        let kind = self.kind.trim();
        kind.eq_ignore_ascii_case("cardio") || kind == "유산소"
    }

    /// Whether the equipment list mentions `code`.
    #[must_use]
    pub fn uses_equipment(&self, code: &str) -> bool {
        self.equipment.to_ascii_uppercase().contains(code)
    }

    #[must_use]
    pub fn is_restricted_for(&self, injury: &str) -> bool {
        self.restricts.iter().any(|r| r == injury)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn exercise(id: ExerciseId, target_area: &str, kind: &str) -> Exercise {
        Exercise {
            id,
            name: format!("exercise {id}"),
            target_area: target_area.to_owned(),
            difficulty: Difficulty::Normal,
            equipment: String::new(),
            kind: kind.to_owned(),
            image: None,
            restricts: Vec::new(),
        }
    }

    #[test]
    fn test_targets_matches_id_and_label() {
        assert!(exercise(1, "core", "STRENGTH").targets(FitnessDimension::Core));
        assert!(exercise(2, "코어", "STRENGTH").targets(FitnessDimension::Core));
        assert!(exercise(3, "Core / Abs", "STRENGTH").targets(FitnessDimension::Core));
        assert!(!exercise(4, "legs", "STRENGTH").targets(FitnessDimension::Core));
    }

    #[test]
    fn test_cardio_kind() {
        assert!(exercise(1, "legs", "CARDIO").is_cardio());
        assert!(exercise(2, "legs", "유산소").is_cardio());
        assert!(!exercise(3, "legs", "STRENGTH").is_cardio());
    }

    #[test]
    fn test_catalog_entry_deserializes_with_defaults() {
        let json = r#"{"id": 7, "name": "Burpee", "target_area": "cardio_endurance",
            "difficulty": "HARD", "kind": "CARDIO"}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(exercise.difficulty, Difficulty::Hard);
        assert!(exercise.equipment.is_empty());
        assert!(exercise.restricts.is_empty());
        assert_eq!(exercise.image, None);
    }
}
