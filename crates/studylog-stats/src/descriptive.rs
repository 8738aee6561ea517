//! Descriptive statistics over samples of `f64` values.
//!
//! All functions take the sample as a slice and never mutate it. Results that
//! are mathematically undefined for the given sample size (the mean of an
//! empty sample, the variance of fewer than two values) are returned as
//! `f64::NAN` rather than panicking, so a value of zero always means "no
//! spread" and never "not enough data".

use serde::Serialize;

/// Returns the algebraic sum of the values.
///
/// The sum of an empty sample is `0.0`.
///
/// # Examples
///
/// ```
/// # use studylog_stats::descriptive::sum;
/// assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
/// assert_eq!(sum(&[]), 0.0);
/// ```
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Returns the arithmetic mean of the values.
///
/// Returns `f64::NAN` if the sample is empty.
///
/// # Examples
///
/// ```
/// # use studylog_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
/// assert!(mean(&[]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    sum(values) / values.len() as f64
}

/// Returns the unbiased sample variance, `Σ(x - mean)² / (n - 1)`.
///
/// Returns `f64::NAN` if the sample has fewer than two values.
///
/// # Examples
///
/// ```
/// # use studylog_stats::descriptive::sample_variance;
/// assert_eq!(sample_variance(&[1.0, 2.0, 3.0]), 1.0);
/// assert!(sample_variance(&[1.0]).is_nan());
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    squares / (values.len() - 1) as f64
}

/// Returns the sample standard deviation, the square root of
/// [`sample_variance`].
///
/// Returns `f64::NAN` if the sample has fewer than two values.
#[must_use]
pub fn standard_deviation(values: &[f64]) -> f64 {
    sample_variance(values).sqrt()
}

/// Returns the standard error of the mean, `standard_deviation / sqrt(n)`.
///
/// Returns `f64::NAN` if the sample has fewer than two values.
///
/// # Examples
///
/// ```
/// # use studylog_stats::descriptive::{standard_deviation, standard_error};
/// let values = [2.0, 4.0, 6.0, 8.0];
/// let expected = standard_deviation(&values) / 2.0;
/// assert!((standard_error(&values) - expected).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn standard_error(values: &[f64]) -> f64 {
    standard_deviation(values) / (values.len() as f64).sqrt()
}

/// Summary statistics of a single non-empty sample.
///
/// Dispersion measures are `NaN` when the sample has a single value; use
/// [`SampleSummary::has_dispersion`] to tell that case apart from a sample
/// with zero spread. When serialized to JSON, `NaN` fields become `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of values in the sample.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Standard error of the mean.
    pub std_err: f64,
}

impl SampleSummary {
    /// Summarizes a sample.
    ///
    /// # Returns
    ///
    /// * `Some(SampleSummary)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use studylog_stats::SampleSummary;
    /// let single = SampleSummary::new(&[2.5]).unwrap();
    /// assert_eq!(single.mean, 2.5);
    /// assert!(single.std_dev.is_nan());
    /// assert!(!single.has_dispersion());
    ///
    /// assert!(SampleSummary::new(&[]).is_none());
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            count: values.len(),
            mean: mean(values),
            std_dev: standard_deviation(values),
            std_err: standard_error(values),
        })
    }

    /// Returns `true` if the sample is large enough for the standard deviation
    /// and standard error to be defined.
    #[must_use]
    pub fn has_dispersion(&self) -> bool {
        self.count >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sum_empty_is_zero() {
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_mean_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_identical_values_have_no_spread() {
        for n in 2..10 {
            let values = vec![3.25; n];
            assert_close(mean(&values), 3.25);
            assert_eq!(sample_variance(&values), 0.0);
            assert_eq!(standard_deviation(&values), 0.0);
            assert_eq!(standard_error(&values), 0.0);
        }
    }

    #[test]
    fn test_single_value_dispersion_is_undefined() {
        let values = [4.0];
        assert_eq!(mean(&values), 4.0);
        assert!(sample_variance(&values).is_nan());
        assert!(standard_deviation(&values).is_nan());
        assert!(standard_error(&values).is_nan());
    }

    #[test]
    fn test_known_sample() {
        // Sample variance of 2,4,4,4,5,5,7,9 is 32/7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_close(sum(&values), 40.0);
        assert_close(mean(&values), 5.0);
        assert_close(sample_variance(&values), 32.0 / 7.0);
        assert_close(standard_deviation(&values), (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_standard_error_relation() {
        let samples: [&[f64]; 4] = [
            &[1.0, 2.0],
            &[0.5, 0.75, 3.0],
            &[-1.0, 4.0, 2.5, 2.5, 10.0],
            &[12.5, 11.0, 9.75, 13.25, 10.5, 8.0],
        ];
        for values in samples {
            let expected = standard_deviation(values) / (values.len() as f64).sqrt();
            assert_close(standard_error(values), expected);
        }
    }

    #[test]
    fn test_order_independence() {
        let forward = [0.9, 1.4, 2.2, 3.1];
        let reversed = [3.1, 2.2, 1.4, 0.9];
        assert_close(mean(&forward), mean(&reversed));
        assert_close(standard_deviation(&forward), standard_deviation(&reversed));
    }

    #[test]
    fn test_summary_of_two_values() {
        let summary = SampleSummary::new(&[2.0, 3.0]).unwrap();
        assert_eq!(summary.count, 2);
        assert_close(summary.mean, 2.5);
        assert_close(summary.std_dev, 0.5_f64.sqrt());
        assert_close(summary.std_err, 0.5);
        assert!(summary.has_dispersion());
    }

    #[test]
    fn test_summary_serializes_nan_as_null() {
        let summary = SampleSummary::new(&[1.0]).unwrap();
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["mean"], 1.0);
        assert!(json["std_dev"].is_null());
        assert!(json["std_err"].is_null());
    }
}
