//! Statistical utilities for the fitrank project.
//!
//! This crate provides the small numeric core used to build and query
//! percentile reference tables:
//!
//! - **Descriptive statistics**: mean, sample variance and standard deviation, range
//! - **Percentiles**: percentile anchors using linear interpolation between closest ranks
//! - **Summary statistics**: descriptive statistics and percentile anchors computed together
//! - **Rank interpolation**: mapping a value back to a rank through a set of anchors
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`summary`]: Combined descriptive statistics and percentiles
//! - [`interpolation`]: Piecewise-linear rank interpolation with flat tails
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use fitrank_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, 2.5);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use fitrank_stats::percentiles::Percentiles;
//!
//! let percentiles = Percentiles::new([1.0, 2.0, 3.0, 4.0, 5.0], &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Interpolating a rank from anchors
//!
//! ```
//! use fitrank_stats::interpolation::RankAnchors;
//!
//! let anchors = RankAnchors::new(&[5.0, 50.0, 95.0], &[10.0, 20.0, 30.0]).unwrap();
//! assert_eq!(anchors.rank_of(15.0), 27.5);
//! assert_eq!(anchors.rank_of(0.0), 5.0);
//! ```

pub mod descriptive;
pub mod interpolation;
pub mod percentiles;
pub mod summary;
