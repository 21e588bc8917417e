//! Property-based tests for VaR and backtest invariants.
//!
//! - VaR does not rise as the confidence level rises
//! - Violations are exactly the returns strictly below VaR
//! - Calibration picks the first of equally accurate levels
//! - Every calculation is a pure function of its inputs

use hvar_core::{ReturnPoint, ReturnSeries, Timestamp};
use hvar_risk::prelude::*;
use proptest::prelude::*;

fn series(values: &[f64]) -> ReturnSeries {
    let start = Timestamp::from_ymd(2023, 6, 1).unwrap();
    ReturnSeries::new(
        "PROP",
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| ReturnPoint::new(start.add_days(i as i64), v))
            .collect(),
    )
}

proptest! {
    #[test]
    fn prop_var_monotonic_in_confidence(
        values in prop::collection::vec(-0.2..0.2f64, 1..300),
    ) {
        let returns = series(&values);
        let mut prev = f64::INFINITY;
        for level in default_confidence_levels() {
            let var = estimate_var(&returns, level).var_return;
            prop_assert!(var <= prev + 1e-12, "VaR rose at {level}: {var} > {prev}");
            prev = var;
        }
    }

    #[test]
    fn prop_var_within_sample_range(
        values in prop::collection::vec(-0.2..0.2f64, 1..300),
        level in 0.5..0.999f64,
    ) {
        let var = estimate_var(&series(&values), level).var_return;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(var >= min - 1e-12 && var <= max + 1e-12);
    }

    #[test]
    fn prop_violations_are_returns_below_var(
        values in prop::collection::vec(-0.2..0.2f64, 1..300),
        level in 0.5..0.999f64,
    ) {
        let result = backtest(&series(&values), level, 1.0).ready().unwrap();
        let below = values.iter().filter(|&&r| r < result.var_return).count();

        prop_assert_eq!(result.violation_count, below);
        prop_assert_eq!(result.sample_size, values.len());
        prop_assert!(result.accuracy <= 1.0 && result.accuracy >= 0.0);
    }

    #[test]
    fn prop_optimum_is_first_maximum(
        values in prop::collection::vec(-0.2..0.2f64, 1..200),
        levels in prop::collection::vec(0.80..0.999f64, 1..12),
    ) {
        let optimal = find_optimal(&series(&values), &levels, 1.0).ready().unwrap();

        prop_assert_eq!(optimal.results.len(), levels.len());
        let best = optimal.optimal.accuracy;
        prop_assert!(optimal.results.iter().all(|r| r.accuracy <= best));
        prop_assert!(optimal.results[..optimal.optimal_index]
            .iter()
            .all(|r| r.accuracy < best));
    }

    #[test]
    fn prop_backtest_is_idempotent(
        values in prop::collection::vec(-0.2..0.2f64, 2..200),
        level in 0.5..0.999f64,
    ) {
        let returns = series(&values);
        prop_assert_eq!(backtest(&returns, level, 1e6), backtest(&returns, level, 1e6));
    }
}
