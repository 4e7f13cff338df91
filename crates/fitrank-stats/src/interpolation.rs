//! Piecewise-linear rank interpolation.
//!
//! [`RankAnchors`] holds a small set of `(rank, value)` anchor points, such as
//! the P5..P95 values of a reference distribution, and maps an arbitrary value
//! back to a rank. Values outside the anchored range are clamped to the first
//! and last rank instead of being extrapolated.

/// Anchor points for mapping a value back to a rank.
///
/// Anchor values must be non-decreasing. This is not verified; with
/// decreasing anchors the result is still finite but meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct RankAnchors {
    ranks: Vec<f64>,
    values: Vec<f64>,
}

impl RankAnchors {
    /// Creates anchors from parallel rank and value slices.
    ///
    /// Returns `None` if the slices are empty or differ in length.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitrank_stats::interpolation::RankAnchors;
    ///
    /// assert!(RankAnchors::new(&[5.0, 95.0], &[1.0, 2.0]).is_some());
    /// assert!(RankAnchors::new(&[5.0, 95.0], &[1.0]).is_none());
    /// assert!(RankAnchors::new(&[], &[]).is_none());
    /// ```
    #[must_use]
    pub fn new(ranks: &[f64], values: &[f64]) -> Option<Self> {
        if ranks.is_empty() || ranks.len() != values.len() {
            return None;
        }
        Some(Self {
            ranks: ranks.to_vec(),
            values: values.to_vec(),
        })
    }

    /// Creates anchors from fixed-size rank and value arrays.
    ///
    /// # Panics
    ///
    /// Panics if `N` is zero.
    #[must_use]
    pub fn from_arrays<const N: usize>(ranks: [f64; N], values: [f64; N]) -> Self {
        assert!(N > 0, "at least one anchor is required");
        Self {
            ranks: ranks.to_vec(),
            values: values.to_vec(),
        }
    }

    /// Returns the interpolated rank of `value`.
    ///
    /// - `value <= first anchor` yields the first rank
    /// - `value >= last anchor` yields the last rank
    /// - otherwise the rank is interpolated linearly between the two
    ///   anchors bracketing `value`
    ///
    /// A `NaN` input yields `NaN`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fitrank_stats::interpolation::RankAnchors;
    ///
    /// let anchors = RankAnchors::new(&[25.0, 50.0], &[30.0, 38.0]).unwrap();
    /// assert_eq!(anchors.rank_of(34.0), 37.5);
    /// assert_eq!(anchors.rank_of(-100.0), 25.0);
    /// assert_eq!(anchors.rank_of(100.0), 50.0);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }
        let last = self.values.len() - 1;
        if value <= self.values[0] {
            return self.ranks[0];
        }
        if value >= self.values[last] {
            return self.ranks[last];
        }

        // values[lower] <= value < values[lower + 1], so the bracket has a non-zero width
        let lower = self.values.partition_point(|&v| v <= value) - 1;
        let (x0, x1) = (self.values[lower], self.values[lower + 1]);
        let (r0, r1) = (self.ranks[lower], self.ranks[lower + 1]);
        r0 + (value - x0) / (x1 - x0) * (r1 - r0)
    }

    /// Returns the anchor points as `(rank, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranks.iter().copied().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_anchors() -> RankAnchors {
        RankAnchors::new(
            &[5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0],
            &[20.0, 25.0, 30.0, 38.0, 45.0, 52.0, 58.0],
        )
        .unwrap()
    }

    #[test]
    fn test_anchor_values_map_to_their_rank() {
        let anchors = sample_anchors();
        for (rank, value) in anchors.iter() {
            assert_eq!(anchors.rank_of(value), rank);
        }
    }

    #[test]
    fn test_tails_are_flat() {
        let anchors = sample_anchors();
        assert_eq!(anchors.rank_of(20.0), 5.0);
        assert_eq!(anchors.rank_of(-1e9), 5.0);
        assert_eq!(anchors.rank_of(58.0), 95.0);
        assert_eq!(anchors.rank_of(1e9), 95.0);
    }

    #[test]
    fn test_rank_is_monotonic() {
        let anchors = sample_anchors();
        let mut previous = f64::NEG_INFINITY;
        for step in 0..=800 {
            let value = 10.0 + f64::from(step) * 0.1;
            let rank = anchors.rank_of(value);
            assert!(rank >= previous, "rank decreased at {value}");
            previous = rank;
        }
    }

    #[test]
    fn test_repeated_anchor_values_do_not_divide_by_zero() {
        let anchors =
            RankAnchors::new(&[5.0, 10.0, 25.0, 50.0], &[1.0, 2.0, 2.0, 4.0]).unwrap();
        assert_eq!(anchors.rank_of(2.0), 25.0);
        assert_eq!(anchors.rank_of(3.0), 37.5);
        assert!(anchors.rank_of(1.5).is_finite());
    }

    #[test]
    fn test_nan_input_is_nan() {
        assert!(sample_anchors().rank_of(f64::NAN).is_nan());
    }
}
