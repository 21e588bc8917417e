//! Per-series work shared by every confidence level of a grid.

use hvar_core::{Assessment, ReturnSeries};
use hvar_math::statistics::{sort_ascending, SummaryStatistics};

use super::{insufficient, BacktestResult, ReturnStats};
use crate::var::estimate_var_sorted;

/// A return series with its order statistics and summary precomputed.
///
/// Sorting and summarising depend only on the series, so a calibration run
/// does them once and reuses them for each candidate level.
pub(crate) struct PreparedReturns<'a> {
    returns: &'a ReturnSeries,
    sorted: Vec<f64>,
    stats: ReturnStats,
}

impl<'a> PreparedReturns<'a> {
    pub(crate) fn new(returns: &'a ReturnSeries) -> Self {
        let values = returns.to_values();
        let stats = SummaryStatistics::from_slice(&values).into();
        Self {
            returns,
            sorted: sort_ascending(&values),
            stats,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub(crate) fn backtest(
        &self,
        confidence_level: f64,
        portfolio_value: f64,
    ) -> Assessment<BacktestResult> {
        if self.is_empty() {
            return insufficient(self.returns);
        }

        let estimate = estimate_var_sorted(self.returns, &self.sorted, confidence_level);
        let var_return = estimate.var_return;

        // Sorted ascending, so the returns below the threshold form a prefix.
        let violation_count = self.sorted.partition_point(|&r| r < var_return);
        let sample_size = self.sorted.len();
        let violation_rate = violation_count as f64 / sample_size as f64;
        let expected_violation_rate = estimate.tail_probability();

        Assessment::Ready(BacktestResult {
            instrument_id: estimate.instrument_id.clone(),
            confidence_level,
            var_return,
            var_amount: estimate.amount(portfolio_value),
            sample_size,
            violation_count,
            violation_rate,
            expected_violation_rate,
            accuracy: 1.0 - (violation_rate - expected_violation_rate).abs(),
            return_stats: self.stats,
        })
    }
}
