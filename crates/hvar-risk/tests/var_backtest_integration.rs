//! End-to-end tests from closing prices to a calibrated VaR.

use approx::assert_relative_eq;
use hvar_core::{
    Assessment, InMemoryPriceSource, InsufficiencyReason, PricePoint, Timestamp,
};
use hvar_risk::prelude::*;
use hvar_risk::RunSummary;

const PORTFOLIO_VALUE: f64 = 1_000_000.0;

fn prices(id: &str, closes: &[f64]) -> Vec<PricePoint> {
    let start = Timestamp::from_ymd(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(id, start.add_days(i as i64), close))
        .collect()
}

// =============================================================================
// SINGLE INSTRUMENT
// =============================================================================

#[test]
fn test_five_prices_at_95() {
    let returns = build_return_series("VNM", &prices("VNM", &[100.0, 102.0, 101.0, 105.0, 103.0]));
    assert_eq!(returns.len(), 4);

    let result = backtest(&returns, 0.95, PORTFOLIO_VALUE).ready().unwrap();

    assert_eq!(format!("{:.6}", result.var_return), "-0.017661");
    assert_relative_eq!(result.var_return, -0.017_661_064_4, epsilon = 1e-9);
    assert_relative_eq!(result.var_amount, 17_661.064_4, epsilon = 1e-3);
    assert_eq!(result.sample_size, 4);
    assert_eq!(result.violation_count, 1);
    assert_relative_eq!(result.violation_rate, 0.25);
    assert_relative_eq!(result.expected_violation_rate, 0.05, epsilon = 1e-12);
    assert_relative_eq!(result.accuracy, 0.8, epsilon = 1e-12);
    assert_relative_eq!(result.return_stats.min, 103.0 / 105.0 - 1.0, epsilon = 1e-15);
    assert_relative_eq!(result.return_stats.max, 105.0 / 101.0 - 1.0, epsilon = 1e-15);
}

#[test]
fn test_estimate_matches_backtest_threshold() {
    let returns = build_return_series("VNM", &prices("VNM", &[100.0, 102.0, 101.0, 105.0, 103.0]));

    let estimate = estimate_var(&returns, 0.95);
    let result = backtest(&returns, 0.95, PORTFOLIO_VALUE).ready().unwrap();

    assert_eq!(estimate.var_return, result.var_return);
    assert_eq!(estimate.amount(PORTFOLIO_VALUE), result.var_amount);
}

#[test]
fn test_single_price_is_insufficient() {
    let returns = build_return_series("FPT", &prices("FPT", &[90.0]));
    assert!(returns.is_empty());

    assert_eq!(estimate_var(&returns, 0.95).var_return, 0.0);

    match find_optimal(&returns, &default_confidence_levels(), PORTFOLIO_VALUE) {
        Assessment::Insufficient(info) => {
            assert_eq!(info.instrument_id.as_str(), "FPT");
            assert_eq!(info.reason, InsufficiencyReason::EmptyReturnSeries);
        }
        Assessment::Ready(_) => panic!("a single price has no returns"),
    }
}

#[test]
fn test_two_prices_single_return() {
    let returns = build_return_series("MSN", &prices("MSN", &[80.0, 84.0]));
    let result = backtest(&returns, 0.95, PORTFOLIO_VALUE).ready().unwrap();

    assert_relative_eq!(result.var_return, 0.05, epsilon = 1e-15);
    assert_eq!(result.violation_count, 0);
    assert!(result.return_stats.std.is_nan());
}

#[test]
fn test_unusable_prices_break_windows() {
    // The zero close drops both returns that touch it.
    let returns = build_return_series("SSI", &prices("SSI", &[30.0, 0.0, 31.0, 32.0]));
    assert_eq!(returns.len(), 1);
    assert_relative_eq!(returns.to_values()[0], 32.0 / 31.0 - 1.0, epsilon = 1e-15);
}

// =============================================================================
// FULL RUN
// =============================================================================

#[test]
fn test_full_run_over_source() {
    let mut points = prices("VNM", &[100.0, 102.0, 101.0, 105.0, 103.0, 99.0, 100.5]);
    points.extend(prices("FPT", &[90.0]));
    points.extend(prices("HPG", &[25.0, 24.0, 24.6, 26.0, 25.1, 25.9]));
    let source = InMemoryPriceSource::from_points(points);

    let series = build_all(&source).unwrap();
    let outcomes = analyze_instruments(
        &series,
        &default_confidence_levels(),
        PORTFOLIO_VALUE,
        ParallelPolicy::default(),
    );

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[1].is_insufficient());

    let optimal: Vec<BacktestResult> = outcomes
        .into_iter()
        .filter_map(Assessment::ready)
        .map(|o| o.optimal)
        .collect();
    assert_eq!(optimal.len(), 2);
    assert!(optimal
        .iter()
        .all(|r| (0.90..=0.99).contains(&r.confidence_level)));

    let summary = RunSummary::from_results(&optimal).unwrap();
    assert_eq!(summary.analyzed, 2);
    assert_eq!(summary.highest_risk.len(), 2);
    assert!(summary.highest_risk[0].var_return <= summary.highest_risk[1].var_return);
}
