//! Persona classification of a percentile vector.
//!
//! [`classify`] applies a first-match rule cascade over the five
//! performance dimensions. Missing percentiles count as 0 in every rule.
//! The cascade order is significant: later rules only see vectors that
//! every earlier rule rejected.

use std::collections::BTreeMap;

use fitrank_reference::dimension::FitnessDimension;
use serde::{Deserialize, Serialize};

/// Percentile per dimension. `None` marks a dimension that was not computed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PercentileVector {
    scores: BTreeMap<FitnessDimension, Option<u8>>,
}

impl PercentileVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, dimension: FitnessDimension, percentile: u8) -> Self {
        self.insert(dimension, Some(percentile));
        self
    }

    pub fn insert(&mut self, dimension: FitnessDimension, percentile: Option<u8>) {
        self.scores.insert(dimension, percentile);
    }

    /// The computed percentile of `dimension`, if any.
    #[must_use]
    pub fn get(&self, dimension: FitnessDimension) -> Option<u8> {
        self.scores.get(&dimension).copied().flatten()
    }

    /// The percentile of `dimension` with missing values read as 0.
    #[must_use]
    pub fn score(&self, dimension: FitnessDimension) -> u8 {
        self.get(dimension).unwrap_or(0)
    }
}

impl FromIterator<(FitnessDimension, Option<u8>)> for PercentileVector {
    fn from_iter<T: IntoIterator<Item = (FitnessDimension, Option<u8>)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    BalancedAthlete,
    StrengthFocused,
    CardioMaster,
    FlexibilityKing,
    Beginner,
    WeakCore,
}

/// Display copy attached to an archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchetypeInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub characteristics: [&'static str; 3],
    pub recommendation: &'static str,
}

impl Archetype {
    pub const ALL: [Self; 6] = [
        Self::BalancedAthlete,
        Self::StrengthFocused,
        Self::CardioMaster,
        Self::FlexibilityKing,
        Self::Beginner,
        Self::WeakCore,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::BalancedAthlete => "balanced_athlete",
            Self::StrengthFocused => "strength_focused",
            Self::CardioMaster => "cardio_master",
            Self::FlexibilityKing => "flexibility_king",
            Self::Beginner => "beginner",
            Self::WeakCore => "weak_core",
        }
    }

    #[must_use]
    pub const fn info(self) -> &'static ArchetypeInfo {
        match self {
            Self::BalancedAthlete => &ArchetypeInfo {
                name: "Workout Buddy",
                emoji: "💪",
                description: "Every fitness component is evenly developed.",
                characteristics: [
                    "Above-average fitness overall",
                    "Keeps a steady exercise habit",
                    "Enjoys many kinds of exercise",
                ],
                recommendation: "Maintain your current level and focus on your weaker areas.",
            },
            Self::StrengthFocused => &ArchetypeInfo {
                name: "Powerhouse",
                emoji: "🏋️",
                description: "Outstanding muscular strength and power.",
                characteristics: [
                    "Excellent strength and power",
                    "Prefers weight training",
                    "Flexibility and cardio lag behind",
                ],
                recommendation: "Add aerobic work and stretching to restore balance.",
            },
            Self::CardioMaster => &ArchetypeInfo {
                name: "Two Hearts",
                emoji: "🏃",
                description: "Exceptional cardiovascular endurance.",
                characteristics: [
                    "Excellent cardio endurance",
                    "Strong over long distances",
                    "Prefers running and cycling",
                ],
                recommendation: "Add strength training to prevent injuries.",
            },
            Self::FlexibilityKing => &ArchetypeInfo {
                name: "Supple Mover",
                emoji: "🧘",
                description: "Excellent flexibility with good body control.",
                characteristics: [
                    "Outstanding flexibility",
                    "Suited to yoga and pilates",
                    "Smooth movement",
                ],
                recommendation: "Build strength and cardio to raise overall fitness.",
            },
            Self::Beginner => &ArchetypeInfo {
                name: "Fresh Sprout",
                emoji: "🌱",
                description: "Just getting started and building base fitness.",
                characteristics: [
                    "Low fitness level overall",
                    "Little exercise experience",
                    "Needs a structured plan",
                ],
                recommendation: "Start with light exercise and raise the intensity gradually.",
            },
            Self::WeakCore => &ArchetypeInfo {
                name: "Paper Person",
                emoji: "📄",
                description: "Weak strength and core; base fitness needs work.",
                characteristics: [
                    "Weak strength and core",
                    "Unstable posture",
                    "Tires easily",
                ],
                recommendation: "Concentrate on core and basic strength exercises.",
            },
        }
    }

    /// Archetype of the fallback rule for the strongest dimension.
    const fn for_strongest(dimension: FitnessDimension) -> Self {
        match dimension {
            FitnessDimension::Strength => Self::StrengthFocused,
            FitnessDimension::CardioEndurance => Self::CardioMaster,
            FitnessDimension::Flexibility => Self::FlexibilityKing,
            _ => Self::BalancedAthlete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub dimension: FitnessDimension,
    pub percentile: u8,
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaProfile {
    pub archetype: Archetype,
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub characteristics: [&'static str; 3],
    pub recommendation: &'static str,
    /// Mean of the non-zero performance percentiles, one decimal. 0 if none.
    pub average_score: f64,
    pub strongest: DimensionScore,
    pub weakest: DimensionScore,
}

const LOW: u8 = 30;
const HIGH: u8 = 80;
const FALLBACK_HIGH: u8 = 70;

/// Classifies `percentiles` into one of the six archetypes.
///
/// Body composition never takes part. Ties for strongest and weakest go to
/// the dimension listed first in [`FitnessDimension::PERFORMANCE`].
#[must_use]
pub fn classify(percentiles: &PercentileVector) -> PersonaProfile {
    let dims = FitnessDimension::PERFORMANCE;
    let score = |d| percentiles.score(d);

    let computed: Vec<f64> = dims
        .iter()
        .map(|&d| score(d))
        .filter(|&s| s > 0)
        .map(f64::from)
        .collect();
    #[expect(clippy::cast_precision_loss)]
    let average = if computed.is_empty() {
        0.0
    } else {
        computed.iter().sum::<f64>() / computed.len() as f64
    };

    let mut strongest = dims[0];
    let mut weakest = dims[0];
    for &d in &dims[1..] {
        if score(d) > score(strongest) {
            strongest = d;
        }
        if score(d) < score(weakest) {
            weakest = d;
        }
    }

    let low_count = dims.iter().filter(|&&d| score(d) < LOW).count();
    let strength = score(FitnessDimension::Strength);
    let core = score(FitnessDimension::Core);

    let archetype = if average >= 60.0 && low_count <= 1 {
        Archetype::BalancedAthlete
    } else if strength >= HIGH {
        Archetype::StrengthFocused
    } else if score(FitnessDimension::CardioEndurance) >= HIGH {
        Archetype::CardioMaster
    } else if score(FitnessDimension::Flexibility) >= HIGH {
        Archetype::FlexibilityKing
    } else if strength < LOW && core < LOW {
        Archetype::WeakCore
    } else if average < f64::from(LOW) || low_count >= 3 {
        Archetype::Beginner
    } else if score(strongest) >= FALLBACK_HIGH {
        Archetype::for_strongest(strongest)
    } else if strength < LOW && core < LOW {
        Archetype::WeakCore
    } else {
        Archetype::Beginner
    };

    let info = archetype.info();
    PersonaProfile {
        archetype,
        name: info.name,
        emoji: info.emoji,
        description: info.description,
        characteristics: info.characteristics,
        recommendation: info.recommendation,
        average_score: (average * 10.0).round() / 10.0,
        strongest: DimensionScore {
            dimension: strongest,
            percentile: score(strongest),
        },
        weakest: DimensionScore {
            dimension: weakest,
            percentile: score(weakest),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use FitnessDimension::{Agility, BodyComposition, CardioEndurance, Core, Flexibility, Strength};

    fn vector(strength: u8, cardio: u8, core: u8, flexibility: u8, agility: u8) -> PercentileVector {
        PercentileVector::new()
            .with(Strength, strength)
            .with(CardioEndurance, cardio)
            .with(Core, core)
            .with(Flexibility, flexibility)
            .with(Agility, agility)
    }

    mod rules {
        use super::*;

        #[test]
        fn test_strength_rule_beats_balanced_when_average_is_low() {
            let percentiles = vector(85, 40, 50, 30, 45).with(BodyComposition, 60);
            let persona = classify(&percentiles);
            assert_eq!(persona.archetype, Archetype::StrengthFocused);
            assert_eq!(persona.average_score, 50.0);
            assert_eq!(persona.strongest.dimension, Strength);
            assert_eq!(persona.weakest.dimension, Flexibility);
            assert_eq!(persona.weakest.percentile, 30);
        }

        #[test]
        fn test_all_low_is_beginner_unless_weak_core() {
            let persona = classify(&vector(30, 10, 30, 10, 10));
            assert_eq!(persona.archetype, Archetype::Beginner);
            assert_eq!(persona.average_score, 18.0);

            // strength and core below 30 match the weak-core rule first
            let persona = classify(&vector(10, 10, 10, 10, 10));
            assert_eq!(persona.archetype, Archetype::WeakCore);
            assert_eq!(persona.average_score, 10.0);
        }

        #[test]
        fn test_balanced_allows_one_low_dimension() {
            assert_eq!(
                classify(&vector(75, 75, 75, 75, 20)).archetype,
                Archetype::BalancedAthlete
            );
            assert_eq!(
                classify(&vector(90, 90, 90, 20, 20)).archetype,
                Archetype::StrengthFocused
            );
        }

        #[test]
        fn test_cardio_and_flexibility_rules() {
            assert_eq!(
                classify(&vector(50, 80, 20, 90, 20)).archetype,
                Archetype::CardioMaster
            );
            assert_eq!(
                classify(&vector(50, 50, 40, 80, 40)).archetype,
                Archetype::FlexibilityKing
            );
        }

        #[test]
        fn test_fallback_uses_strongest_dimension() {
            // average 48, two lows, nothing >= 80
            assert_eq!(
                classify(&vector(75, 50, 20, 20, 75)).archetype,
                Archetype::StrengthFocused
            );
            assert_eq!(
                classify(&vector(40, 40, 40, 40, 75)).archetype,
                Archetype::BalancedAthlete
            );
            assert_eq!(
                classify(&vector(40, 50, 40, 40, 40)).archetype,
                Archetype::Beginner
            );
        }

        #[test]
        fn test_missing_dimensions_count_as_low() {
            let percentiles = PercentileVector::new()
                .with(Strength, 90)
                .with(CardioEndurance, 90);
            let persona = classify(&percentiles);
            // average over computed scores is 90, but three dimensions are missing
            assert_eq!(persona.average_score, 90.0);
            assert_eq!(persona.archetype, Archetype::StrengthFocused);
            assert_eq!(persona.weakest.dimension, Core);
            assert_eq!(persona.weakest.percentile, 0);
        }

        #[test]
        fn test_empty_vector() {
            let persona = classify(&PercentileVector::new());
            assert_eq!(persona.archetype, Archetype::WeakCore);
            assert_eq!(persona.average_score, 0.0);
            assert_eq!(persona.strongest.dimension, Strength);
            assert_eq!(persona.strongest.percentile, 0);
        }
    }

    #[test]
    fn test_classification_is_total_over_a_grid() {
        let steps = [0, 10, 29, 30, 50, 60, 69, 70, 79, 80, 100];
        let mut seen = std::collections::HashSet::new();
        for &s in &steps {
            for &c in &steps {
                for &k in &steps {
                    for &f in &steps {
                        for &a in &steps {
                            let persona = classify(&vector(s, c, k, f, a));
                            assert!(Archetype::ALL.contains(&persona.archetype));
                            assert!((0.0..=100.0).contains(&persona.average_score));
                            seen.insert(persona.archetype);
                        }
                    }
                }
            }
        }
        assert_eq!(seen.len(), Archetype::ALL.len());
    }

    #[test]
    fn test_body_composition_is_ignored() {
        let base = vector(40, 40, 40, 40, 40);
        let with_body = base.clone().with(BodyComposition, 100);
        assert_eq!(classify(&base), classify(&with_body));
    }

    #[test]
    fn test_vector_deserializes_nulls() {
        let json = r#"{"strength": 85, "core": null, "cardio_endurance": 40}"#;
        let percentiles: PercentileVector = serde_json::from_str(json).unwrap();
        assert_eq!(percentiles.get(Strength), Some(85));
        assert_eq!(percentiles.get(Core), None);
        assert_eq!(percentiles.score(Core), 0);
        assert_eq!(percentiles.get(Agility), None);
    }
}
