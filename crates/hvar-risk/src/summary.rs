//! Cross-instrument summary of a calibration run.

use std::collections::BTreeMap;

use hvar_core::InstrumentId;
use serde::{Deserialize, Serialize};

use crate::backtest::BacktestResult;

/// Number of instruments listed in each risk ranking.
pub const RANKING_SIZE: usize = 3;

/// How many instruments settled on one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCount {
    /// The confidence level.
    pub confidence_level: f64,
    /// Instruments whose optimum is this level.
    pub count: usize,
    /// `count` as a percentage of all analysed instruments.
    pub percentage: f64,
}

/// One line of a risk ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRanking {
    /// Instrument ranked.
    pub instrument_id: InstrumentId,
    /// Its optimal VaR, as a signed return.
    pub var_return: f64,
    /// The confidence level that VaR was estimated at.
    pub confidence_level: f64,
}

impl From<&BacktestResult> for RiskRanking {
    fn from(result: &BacktestResult) -> Self {
        Self {
            instrument_id: result.instrument_id.clone(),
            var_return: result.var_return,
            confidence_level: result.confidence_level,
        }
    }
}

/// Aggregates over the optimal results of every analysed instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Instruments analysed.
    pub analyzed: usize,
    /// Mean optimal confidence level.
    pub mean_confidence_level: f64,
    /// Most frequent optimal confidence level; the smallest one on a tie.
    pub modal_confidence_level: f64,
    /// Mean optimal VaR, as a signed return.
    pub mean_var_return: f64,
    /// Mean accuracy of the optimal results.
    pub mean_accuracy: f64,
    /// Optimal levels in ascending order with their frequencies.
    pub distribution: Vec<LevelCount>,
    /// Instruments with the most negative VaR, worst first.
    pub highest_risk: Vec<RiskRanking>,
    /// Instruments with the least negative VaR, mildest first.
    pub lowest_risk: Vec<RiskRanking>,
}

impl RunSummary {
    /// Summarises the optimal results of a run.
    ///
    /// Returns `None` when there is nothing to summarise.
    pub fn from_results(results: &[BacktestResult]) -> Option<Self> {
        if results.is_empty() {
            return None;
        }
        let n = results.len() as f64;
        let mean = |f: fn(&BacktestResult) -> f64| results.iter().map(f).sum::<f64>() / n;

        // Levels come off a user grid verbatim, so bit equality groups them.
        let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
        for result in results {
            *counts.entry(level_key(result.confidence_level)).or_default() += 1;
        }
        let mut distribution: Vec<LevelCount> = counts
            .into_iter()
            .map(|(key, count)| LevelCount {
                confidence_level: f64::from_bits(key),
                count,
                percentage: count as f64 / n * 100.0,
            })
            .collect();
        distribution.sort_by(|a, b| a.confidence_level.total_cmp(&b.confidence_level));

        // Ascending order, so keeping the first maximum picks the smallest level.
        let modal_confidence_level = distribution
            .iter()
            .fold(None::<&LevelCount>, |best, lc| match best {
                Some(b) if b.count >= lc.count => Some(b),
                _ => Some(lc),
            })
            .map_or(f64::NAN, |lc| lc.confidence_level);

        let mut by_risk: Vec<&BacktestResult> = results.iter().collect();
        by_risk.sort_by(|a, b| a.var_return.total_cmp(&b.var_return));

        Some(Self {
            analyzed: results.len(),
            mean_confidence_level: mean(|r| r.confidence_level),
            modal_confidence_level,
            mean_var_return: mean(|r| r.var_return),
            mean_accuracy: mean(|r| r.accuracy),
            distribution,
            highest_risk: by_risk
                .iter()
                .take(RANKING_SIZE)
                .map(|r| RiskRanking::from(*r))
                .collect(),
            lowest_risk: by_risk
                .iter()
                .rev()
                .take(RANKING_SIZE)
                .map(|r| RiskRanking::from(*r))
                .collect(),
        })
    }
}

fn level_key(level: f64) -> u64 {
    // Fold -0.0 into 0.0 so both land in one bucket.
    (level + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backtest::ReturnStats;
    use approx::assert_relative_eq;

    fn result(id: &str, level: f64, var_return: f64, accuracy: f64) -> BacktestResult {
        BacktestResult {
            instrument_id: InstrumentId::new(id),
            confidence_level: level,
            var_return,
            var_amount: var_return.abs() * 1_000_000.0,
            sample_size: 250,
            violation_count: 5,
            violation_rate: 0.02,
            expected_violation_rate: 1.0 - level,
            accuracy,
            return_stats: ReturnStats {
                min: -0.07,
                max: 0.07,
                mean: 0.0005,
                std: 0.02,
            },
        }
    }

    fn sample() -> Vec<BacktestResult> {
        vec![
            result("VNM", 0.95, -0.021, 0.99),
            result("FPT", 0.99, -0.035, 0.98),
            result("HPG", 0.95, -0.042, 0.97),
            result("MWG", 0.90, -0.015, 0.96),
            result("VCB", 0.99, -0.011, 1.00),
        ]
    }

    #[test]
    fn test_empty_is_none() {
        assert!(RunSummary::from_results(&[]).is_none());
    }

    #[test]
    fn test_means_and_mode() {
        let summary = RunSummary::from_results(&sample()).unwrap();

        assert_eq!(summary.analyzed, 5);
        assert_relative_eq!(summary.mean_confidence_level, 0.956, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_var_return, -0.0248, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_accuracy, 0.98, epsilon = 1e-12);
        // 0.95 and 0.99 both appear twice; the smaller wins.
        assert_eq!(summary.modal_confidence_level, 0.95);
    }

    #[test]
    fn test_distribution_ascending() {
        let summary = RunSummary::from_results(&sample()).unwrap();

        let levels: Vec<f64> = summary
            .distribution
            .iter()
            .map(|lc| lc.confidence_level)
            .collect();
        assert_eq!(levels, vec![0.90, 0.95, 0.99]);
        assert_eq!(summary.distribution[1].count, 2);
        assert_relative_eq!(summary.distribution[1].percentage, 40.0, epsilon = 1e-12);
        let total: usize = summary.distribution.iter().map(|lc| lc.count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn test_risk_rankings() {
        let summary = RunSummary::from_results(&sample()).unwrap();

        let highest: Vec<&str> = summary
            .highest_risk
            .iter()
            .map(|r| r.instrument_id.as_str())
            .collect();
        let lowest: Vec<&str> = summary
            .lowest_risk
            .iter()
            .map(|r| r.instrument_id.as_str())
            .collect();

        assert_eq!(highest, vec!["HPG", "FPT", "VNM"]);
        assert_eq!(lowest, vec!["VCB", "MWG", "VNM"]);
    }

    #[test]
    fn test_rankings_shorter_than_three() {
        let summary = RunSummary::from_results(&sample()[..2]).unwrap();
        assert_eq!(summary.highest_risk.len(), 2);
        assert_eq!(summary.lowest_risk.len(), 2);
        assert_eq!(summary.modal_confidence_level, 0.95);
    }
}
