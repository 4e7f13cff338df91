//! Instant exercise picks.

use fitrank_engine::persona::PercentileVector;
use fitrank_reference::dimension::FitnessDimension;
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    exercise::{Exercise, ExerciseId},
    strategy::weakest_of,
};

/// Number of exercises picked.
pub const PICK_COUNT: usize = 3;

/// Dimensions considered when looking for a weakness to address.
const WEAKNESS_CANDIDATES: [FitnessDimension; 4] = [
    FitnessDimension::Strength,
    FitnessDimension::CardioEndurance,
    FitnessDimension::Flexibility,
    FitnessDimension::Core,
];

/// Picks up to [`PICK_COUNT`] distinct exercises from `candidates`.
///
/// The first pick targets the user's weakest dimension (core when there is
/// no analysis), the second is a cardio exercise, and the rest are drawn at
/// random. A slot whose pool is empty is filled by the random draw instead.
/// With fewer than [`PICK_COUNT`] candidates, all of them are returned.
pub fn instant_recommendations<R>(
    candidates: &[Exercise],
    analysis: Option<&PercentileVector>,
    rng: &mut R,
) -> Vec<ExerciseId>
where
    R: Rng + ?Sized,
{
    if candidates.len() < PICK_COUNT {
        return candidates.iter().map(|e| e.id).collect();
    }

    let weakest = analysis
        .and_then(|analysis| weakest_of(analysis, &WEAKNESS_CANDIDATES))
        .unwrap_or(FitnessDimension::Core);

    let mut remaining: Vec<&Exercise> = candidates.iter().collect();
    let mut picked = Vec::with_capacity(PICK_COUNT);

    let pool = positions(&remaining, |e| e.targets(weakest));
    picked.extend(take(&mut remaining, &pool, rng));
    let pool = positions(&remaining, Exercise::is_cardio);
    picked.extend(take(&mut remaining, &pool, rng));
    while picked.len() < PICK_COUNT && !remaining.is_empty() {
        let pool: Vec<usize> = (0..remaining.len()).collect();
        picked.extend(take(&mut remaining, &pool, rng));
    }
    picked
}

/// Removes a random exercise whose position is in `pool`.
fn take<R>(remaining: &mut Vec<&Exercise>, pool: &[usize], rng: &mut R) -> Option<ExerciseId>
where
    R: Rng + ?Sized,
{
    let index = *pool.choose(rng)?;
    Some(remaining.remove(index).id)
}

fn positions<F>(exercises: &[&Exercise], mut predicate: F) -> Vec<usize>
where
    F: FnMut(&Exercise) -> bool,
{
    exercises
        .iter()
        .enumerate()
        .filter_map(|(i, &e)| predicate(e).then_some(i))
        .collect()
}
