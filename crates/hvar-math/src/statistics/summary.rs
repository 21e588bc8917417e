//! Summary statistics of a return sample.

use statrs::statistics::Statistics;

/// Min, max, mean, and sample standard deviation of a sample.
///
/// Every field follows the conventions of `statrs`: an empty sample yields
/// NaN everywhere, and the standard deviation of a single observation is NaN
/// (the `n - 1` denominator is zero). Callers rely on that NaN to spot
/// samples too small to say anything about dispersion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Number of observations.
    pub count: usize,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Computes summary statistics of `data`.
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            count: data.len(),
            min: Statistics::min(data.iter()),
            max: Statistics::max(data.iter()),
            mean: data.iter().mean(),
            std_dev: data.iter().std_dev(),
        }
    }
}
