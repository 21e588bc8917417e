//! VaR backtesting.
//!
//! A backtest replays an instrument's own history against its VaR estimate:
//! every day whose return fell strictly below the estimate is a violation.
//! A well-calibrated estimate at confidence level `c` is breached on about
//! `1 - c` of days; [`BacktestResult::accuracy`] scores how close it came.

mod prepared;

pub(crate) use prepared::PreparedReturns;

use hvar_core::{Assessment, InstrumentId, InsufficiencyReason, ReturnSeries};
use hvar_math::statistics::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of the returns a backtest ran over.
///
/// `std` is the sample standard deviation and is NaN for a single return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStats {
    /// Worst return.
    pub min: f64,
    /// Best return.
    pub max: f64,
    /// Mean return.
    pub mean: f64,
    /// Sample standard deviation of returns.
    pub std: f64,
}

impl ReturnStats {
    /// Returns true if the sample was large enough for `std` to be defined.
    pub fn has_dispersion(&self) -> bool {
        self.std.is_finite()
    }
}

impl From<SummaryStatistics> for ReturnStats {
    fn from(stats: SummaryStatistics) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            mean: stats.mean,
            std: stats.std_dev,
        }
    }
}

/// Outcome of backtesting one instrument at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Instrument tested.
    pub instrument_id: InstrumentId,
    /// Confidence level of the VaR estimate.
    pub confidence_level: f64,
    /// VaR as a signed fractional return.
    pub var_return: f64,
    /// VaR as a loss amount: `|var_return| × portfolio_value`.
    pub var_amount: f64,
    /// Number of returns tested.
    pub sample_size: usize,
    /// Number of returns strictly below `var_return`.
    pub violation_count: usize,
    /// `violation_count / sample_size`.
    pub violation_rate: f64,
    /// `1 - confidence_level`.
    pub expected_violation_rate: f64,
    /// `1 - |violation_rate - expected_violation_rate|`.
    pub accuracy: f64,
    /// Statistics of the tested returns.
    pub return_stats: ReturnStats,
}

impl BacktestResult {
    /// Observed minus expected violation rate.
    ///
    /// Positive when the estimate was breached more often than it promised,
    /// i.e. it understated risk.
    pub fn excess_violation_rate(&self) -> f64 {
        self.violation_rate - self.expected_violation_rate
    }
}

/// Backtests the historical VaR of `returns` at `confidence_level`.
///
/// # Arguments
///
/// * `returns` - Historical daily returns of one instrument
/// * `confidence_level` - Confidence level, strictly between 0 and 1
/// * `portfolio_value` - Position value used to express VaR as an amount
///
/// # Returns
///
/// `Assessment::Insufficient` with [`InsufficiencyReason::EmptyReturnSeries`]
/// for an empty series; otherwise the filled-in result.
pub fn backtest(
    returns: &ReturnSeries,
    confidence_level: f64,
    portfolio_value: f64,
) -> Assessment<BacktestResult> {
    PreparedReturns::new(returns).backtest(confidence_level, portfolio_value)
}

pub(crate) fn insufficient<T>(returns: &ReturnSeries) -> Assessment<T> {
    Assessment::insufficient(
        returns.instrument_id().clone(),
        InsufficiencyReason::EmptyReturnSeries,
    )
}
