//! Percentiles with linear interpolation between closest ranks.

/// Value of the `percentile`-th percentile of `sorted`.
///
/// The percentile sits at fractional index `(n - 1) * percentile / 100`
/// and is read off the straight line between its two neighbours. This is
/// the "linear" method found as the default in most numeric libraries.
/// `percentile` is clamped to `0..=100`; an empty slice gives `NaN`.
///
/// ```
/// use fitrank_stats::percentiles::compute_percentile;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&sorted, 50.0), 2.5);
/// assert_eq!(compute_percentile(&sorted, 0.0), 1.0);
/// assert_eq!(compute_percentile(&sorted, 100.0), 4.0);
/// assert!(compute_percentile(&[], 50.0).is_nan());
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted: &[f64], percentile: f64) -> f64 {
    let Some(last) = sorted.len().checked_sub(1) else {
        return f64::NAN;
    };
    let index = last as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let below = index.floor() as usize;
    let above = (below + 1).min(last);
    let weight = index - index.floor();
    sorted[below] + (sorted[above] - sorted[below]) * weight
}

/// Percentile values computed for a fixed list of percentile points.
///
/// ```
/// use fitrank_stats::percentiles::Percentiles;
///
/// let p = Percentiles::new([10.0, 1.0, 7.0, 4.0], &[5.0, 50.0]);
/// assert_eq!(p.get(50.0), Some(5.5));
/// assert_eq!(p.get(95.0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    anchors: Vec<(f64, f64)>,
}

impl Percentiles {
    #[must_use]
    pub fn new<I>(values: I, points: &[f64]) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, points)
    }

    /// # Panics
    ///
    /// Panics if `sorted` is not in ascending order.
    #[must_use]
    pub fn from_sorted(sorted: &[f64], points: &[f64]) -> Self {
        assert!(
            sorted.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );
        Self {
            anchors: points
                .iter()
                .map(|&point| (point, compute_percentile(sorted, point)))
                .collect(),
        }
    }

    /// Value at `point`, if it was one of the requested points.
    #[must_use]
    pub fn get(&self, point: f64) -> Option<f64> {
        self.anchors
            .iter()
            .find(|(p, _)| (p - point).abs() < f64::EPSILON)
            .map(|&(_, value)| value)
    }

    /// `(point, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.anchors.iter().copied()
    }
}
