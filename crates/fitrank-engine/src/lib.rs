//! Request-time fitness assessment.
//!
//! This crate turns raw test results into percentiles and personas:
//!
//! 1. [`conversion`] maps a user test result into the units of the reference
//!    test of its dimension.
//! 2. [`percentile`] interpolates a percentile from the reference anchors of
//!    the user's gender and age group.
//! 3. [`profile`] validates user input and runs both steps for every
//!    supplied test.
//! 4. [`persona`] classifies the resulting percentile vector.
//! 5. [`report`] assembles the summary handed to a report generator.
//!
//! [`Assessor`] owns the tables the first two steps need.
//!
//! Lookup failures never abort a profile. They are [`LookupError`] values
//! recorded next to the dimension they affect.
//!
//! ```
//! use fitrank_engine::{
//!     Assessor,
//!     persona::{Archetype, PercentileVector, classify},
//! };
//! use fitrank_reference::{dimension::FitnessDimension, group::Gender, table::ReferenceTable};
//!
//! let assessor = Assessor::with_standard_conversions(ReferenceTable::default());
//! let conversion = assessor.convert("forward_fold", 4.0, Gender::Female, 52).unwrap();
//! assert_eq!(conversion.converted_value, 10.0);
//!
//! let vector = PercentileVector::new()
//!     .with(FitnessDimension::Strength, 85)
//!     .with(FitnessDimension::CardioEndurance, 40);
//! assert_eq!(classify(&vector).archetype, Archetype::StrengthFocused);
//! ```

pub use self::{
    assessor::{Assessor, TestPercentile},
    error::{LookupError, ValidationError},
};

mod assessor;
pub mod conversion;
mod error;
pub mod percentile;
pub mod persona;
pub mod profile;
pub mod report;
