//! Descriptive statistics over return samples.
//!
//! - [`quantile_linear`] / [`quantile_sorted`]: empirical quantiles with
//!   linear interpolation between order statistics
//! - [`SummaryStatistics`]: min, max, mean, and sample standard deviation

mod quantile;
mod summary;

pub use quantile::{quantile_linear, quantile_sorted, sort_ascending};
pub use summary::SummaryStatistics;
