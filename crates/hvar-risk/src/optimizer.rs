//! Confidence-level calibration.
//!
//! Runs the backtest at every candidate confidence level and keeps the level
//! whose observed violation rate sits closest to the rate it promised.

use hvar_core::{Assessment, InstrumentId, InsufficiencyReason, ReturnSeries};
use serde::{Deserialize, Serialize};

use crate::backtest::{BacktestResult, PreparedReturns};

/// Default candidate grid: 90% to 99% in one-point steps.
pub fn default_confidence_levels() -> Vec<f64> {
    (90..=99).map(|pct| f64::from(pct) / 100.0).collect()
}

/// Best-calibrated backtest of one instrument, with every result considered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalResult {
    /// Instrument calibrated.
    pub instrument_id: InstrumentId,
    /// The result with the highest accuracy.
    pub optimal: BacktestResult,
    /// Position of `optimal` within `results`.
    pub optimal_index: usize,
    /// Every evaluated result, in the order the levels were supplied.
    pub results: Vec<BacktestResult>,
}

impl OptimalResult {
    /// Returns true if `results[index]` is the selected optimum.
    pub fn is_optimal(&self, index: usize) -> bool {
        index == self.optimal_index
    }
}

/// Finds the best-calibrated confidence level for one instrument.
///
/// Each candidate is backtested in input order. Candidates without a result
/// are skipped. The optimum is the strictly greatest accuracy; on an exact
/// tie the candidate supplied first wins. Duplicate levels are evaluated
/// as given.
///
/// # Arguments
///
/// * `returns` - Historical daily returns of one instrument
/// * `confidence_levels` - Candidate levels, each strictly between 0 and 1
/// * `portfolio_value` - Position value used to express VaR as an amount
///
/// # Returns
///
/// `Assessment::Insufficient` when no candidate produced a result: an empty
/// series, or an empty grid.
pub fn find_optimal(
    returns: &ReturnSeries,
    confidence_levels: &[f64],
    portfolio_value: f64,
) -> Assessment<OptimalResult> {
    let prepared = PreparedReturns::new(returns);
    if prepared.is_empty() {
        return Assessment::insufficient(
            returns.instrument_id().clone(),
            InsufficiencyReason::EmptyReturnSeries,
        );
    }

    let results: Vec<BacktestResult> = confidence_levels
        .iter()
        .filter_map(|&level| prepared.backtest(level, portfolio_value).ready())
        .collect();

    let Some(optimal_index) = select_most_accurate(&results) else {
        return Assessment::insufficient(
            returns.instrument_id().clone(),
            InsufficiencyReason::NoUsableConfidenceLevel,
        );
    };

    let optimal = results[optimal_index].clone();
    log::debug!(
        "{}: optimal confidence level {} (accuracy {:.4}) of {} candidates",
        returns.instrument_id(),
        optimal.confidence_level,
        optimal.accuracy,
        results.len()
    );

    Assessment::Ready(OptimalResult {
        instrument_id: returns.instrument_id().clone(),
        optimal,
        optimal_index,
        results,
    })
}

/// Index of the first result with the strictly greatest accuracy.
///
/// The running best is replaced only on `>`, so ties keep the earlier entry
/// and a NaN accuracy is never selected.
fn select_most_accurate(results: &[BacktestResult]) -> Option<usize> {
    results
        .iter()
        .enumerate()
        .fold(None::<(usize, f64)>, |best, (i, result)| {
            let best_accuracy = best.map_or(f64::NEG_INFINITY, |(_, accuracy)| accuracy);
            if result.accuracy > best_accuracy {
                Some((i, result.accuracy))
            } else {
                best
            }
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::ReturnStats;
    use hvar_core::{ReturnPoint, Timestamp};

    fn series(values: &[f64]) -> ReturnSeries {
        let t0 = Timestamp::from_ymd(2024, 1, 1).unwrap();
        ReturnSeries::new(
            "HPG",
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| ReturnPoint::new(t0.add_days(i as i64), v))
                .collect(),
        )
    }

    fn result_with_accuracy(level: f64, accuracy: f64) -> BacktestResult {
        BacktestResult {
            instrument_id: InstrumentId::new("HPG"),
            confidence_level: level,
            var_return: -0.02,
            var_amount: 0.0,
            sample_size: 10,
            violation_count: 1,
            violation_rate: 0.1,
            expected_violation_rate: 1.0 - level,
            accuracy,
            return_stats: ReturnStats {
                min: -0.03,
                max: 0.03,
                mean: 0.0,
                std: 0.01,
            },
        }
    }

    #[test]
    fn test_default_grid() {
        let grid = default_confidence_levels();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0], 0.90);
        assert_eq!(grid[5], 0.95);
        assert_eq!(grid[9], 0.99);
    }

    #[test]
    fn test_select_first_on_tie() {
        let results = vec![
            result_with_accuracy(0.90, 0.97),
            result_with_accuracy(0.95, 0.99),
            result_with_accuracy(0.99, 0.99),
        ];
        assert_eq!(select_most_accurate(&results), Some(1));
    }

    #[test]
    fn test_select_skips_nan() {
        let results = vec![
            result_with_accuracy(0.90, f64::NAN),
            result_with_accuracy(0.95, 0.5),
        ];
        assert_eq!(select_most_accurate(&results), Some(1));
        assert_eq!(
            select_most_accurate(&[result_with_accuracy(0.9, f64::NAN)]),
            None
        );
        assert_eq!(select_most_accurate(&[]), None);
    }

    #[test]
    fn test_find_optimal_keeps_all_results_in_order() {
        let returns = series(&[
            -0.05, -0.04, 0.01, 0.02, 0.0, -0.01, 0.03, 0.01, -0.02, 0.015,
        ]);
        let grid = [0.99, 0.90, 0.95];

        let optimal = find_optimal(&returns, &grid, 1_000_000.0).ready().unwrap();

        let levels: Vec<f64> = optimal.results.iter().map(|r| r.confidence_level).collect();
        assert_eq!(levels, vec![0.99, 0.90, 0.95]);
        assert_eq!(optimal.optimal, optimal.results[optimal.optimal_index]);
        assert!(optimal
            .results
            .iter()
            .all(|r| r.accuracy <= optimal.optimal.accuracy));
    }

    #[test]
    fn test_duplicate_levels_first_wins() {
        let returns = series(&[
            -0.05, -0.04, 0.01, 0.02, 0.0, -0.01, 0.03, 0.01, -0.02, 0.015,
        ]);

        // 0.90 is exact here (one violation in ten), so both copies tie at the top.
        let optimal = find_optimal(&returns, &[0.99, 0.90, 0.90], 1.0)
            .ready()
            .unwrap();

        assert_eq!(optimal.optimal_index, 1);
        assert!(optimal.is_optimal(1));
        assert!(!optimal.is_optimal(2));
        assert_eq!(optimal.results.len(), 3);
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        let outcome = find_optimal(&ReturnSeries::empty("HPG"), &default_confidence_levels(), 1.0);
        match outcome {
            Assessment::Insufficient(info) => {
                assert_eq!(info.reason, InsufficiencyReason::EmptyReturnSeries);
            }
            Assessment::Ready(_) => panic!("expected insufficient data"),
        }
    }

    #[test]
    fn test_empty_grid_is_insufficient() {
        let outcome = find_optimal(&series(&[0.01, -0.01]), &[], 1.0);
        match outcome {
            Assessment::Insufficient(info) => {
                assert_eq!(info.reason, InsufficiencyReason::NoUsableConfidenceLevel);
            }
            Assessment::Ready(_) => panic!("expected insufficient data"),
        }
    }
}
