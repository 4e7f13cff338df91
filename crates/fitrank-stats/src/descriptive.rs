/// Moments and range of a sample.
///
/// Variance and standard deviation are sample estimates with an `n - 1`
/// denominator, and are `NaN` for a single value.
///
/// ```
/// use fitrank_stats::descriptive::DescriptiveStats;
///
/// let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0, 5.0]).unwrap();
/// assert_eq!((stats.min, stats.max), (1.0, 5.0));
/// assert_eq!(stats.mean, 3.0);
/// assert_eq!(stats.variance, 2.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Returns `None` for an empty sample.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        let (min, max) = values.iter().fold(None, |range, &v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })?;
        let count = values.len();
        let n = count as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = if count > 1 {
            let squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            squares / (n - 1.0)
        } else {
            f64::NAN
        };
        Some(Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample_has_no_stats() {
        assert_eq!(DescriptiveStats::new(Vec::new()), None);
    }

    #[test]
    fn test_standard_deviation_uses_n_minus_one() {
        // population std of this set is 2.0
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
        assert!((stats.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_undefined_spread() {
        let stats = DescriptiveStats::new([3.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 3.0);
        assert!(stats.std_dev.is_nan());
    }
}
