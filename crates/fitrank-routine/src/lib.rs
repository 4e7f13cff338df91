//! Exercise recommendations and weekly routines.
//!
//! The catalog is narrowed to safe [candidates](candidate::filter_candidates)
//! for the user's [`TrainingContext`](candidate::TrainingContext). From the
//! candidates this crate picks [instant recommendations](recommend::instant_recommendations)
//! and validates weekly routines designed by an external
//! [`RoutinePlanner`](routine::RoutinePlanner), which is steered by a
//! [`TrainingStrategy`](strategy::TrainingStrategy) built from the user's
//! percentile analysis.

pub mod candidate;
pub mod exercise;
pub mod recommend;
pub mod routine;
pub mod strategy;
