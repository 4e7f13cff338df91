//! Reference data for fitness percentile scoring.
//!
//! This crate holds the domain vocabulary shared by every fitrank component
//! and the offline job that turns a national fitness survey export into a
//! percentile reference table.
//!
//! # Overview
//!
//! 1. **Vocabulary** ([`dimension`], [`group`]): fitness dimensions, genders,
//!    age buckets and the reference group keys built from them
//! 2. **Load Population** ([`population::PopulationTable`]): read the survey CSV,
//!    validating required columns up front
//! 3. **Build Table** ([`builder::build_reference_table`]): percentile anchors,
//!    mean, sample standard deviation and count per group and dimension
//! 4. **Persist / Load** ([`table::ReferenceTable`]): JSON document for request-time
//!    lookups, flat CSV rows for inspection
//!
//! # Example
//!
//! ```no_run
//! use fitrank_reference::{builder::build_reference_table, population::PopulationTable};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let population = PopulationTable::from_csv_path("fitness_cleaned.csv")?;
//! let build = build_reference_table(&population);
//! println!(
//!     "Built {} groups ({} pairs skipped)",
//!     build.table.len(),
//!     build.skipped.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod dimension;
pub mod group;
pub mod population;
pub mod table;
