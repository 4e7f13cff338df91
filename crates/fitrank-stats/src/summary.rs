use crate::{descriptive::DescriptiveStats, percentiles::Percentiles};

/// Descriptive statistics and percentiles of one sample, computed in one pass
/// over a single sorted copy.
///
/// ```
/// use fitrank_stats::summary::SummaryStats;
///
/// let summary = SummaryStats::new((1..=10).map(f64::from), &[25.0, 50.0]).unwrap();
/// assert_eq!(summary.stats.mean, 5.5);
/// assert_eq!(summary.percentiles.get(25.0), Some(3.25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub stats: DescriptiveStats,
    pub percentiles: Percentiles,
}

impl SummaryStats {
    /// Returns `None` for an empty sample.
    #[must_use]
    pub fn new<I>(values: I, points: &[f64]) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::new(sorted.iter().copied())?;
        let percentiles = Percentiles::from_sorted(&sorted, points);
        Some(Self { stats, percentiles })
    }
}
