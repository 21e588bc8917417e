//! Historical VaR calculation.

use hvar_core::ReturnSeries;
use hvar_math::statistics::{quantile_sorted, sort_ascending};

use super::VaREstimate;

/// Calculate historical VaR from a return series.
///
/// The estimate is the `(1 - confidence_level)` quantile of the returns,
/// interpolated linearly between order statistics (the default method of
/// numpy's `percentile`).
///
/// # Arguments
///
/// * `returns` - Historical daily returns of one instrument
/// * `confidence_level` - Confidence level, strictly between 0 and 1
///
/// # Preconditions
///
/// `confidence_level` must lie in `(0, 1)`. This is not checked here;
/// validate it where levels enter the system (see `hvar-config`). A level
/// outside `[0, 1]` yields a NaN `var_return`.
///
/// # Empty input
///
/// An empty series yields `var_return == 0.0`, a no-data sentinel. Callers
/// that need to tell "no data" from "no risk" should use
/// [`crate::backtest`], which reports insufficiency explicitly.
pub fn estimate_var(returns: &ReturnSeries, confidence_level: f64) -> VaREstimate {
    let sorted = sort_ascending(&returns.to_values());
    estimate_var_sorted(returns, &sorted, confidence_level)
}

/// Same as [`estimate_var`] over returns that have already been sorted.
pub(crate) fn estimate_var_sorted(
    returns: &ReturnSeries,
    sorted: &[f64],
    confidence_level: f64,
) -> VaREstimate {
    let var_return = if sorted.is_empty() {
        0.0
    } else {
        quantile_sorted(sorted, 1.0 - confidence_level).unwrap_or_else(|e| {
            log::warn!(
                "{}: confidence level {confidence_level} outside (0, 1): {e}",
                returns.instrument_id()
            );
            f64::NAN
        })
    };

    VaREstimate {
        instrument_id: returns.instrument_id().clone(),
        confidence_level,
        var_return,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hvar_core::{ReturnPoint, Timestamp};

    fn series(values: &[f64]) -> ReturnSeries {
        let t0 = Timestamp::from_ymd(2024, 1, 1).unwrap();
        ReturnSeries::new(
            "SSI",
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| ReturnPoint::new(t0.add_days(i as i64), v))
                .collect(),
        )
    }

    #[test]
    fn test_historical_var() {
        let returns = series(&[
            -0.02, -0.015, -0.01, -0.005, 0.0, 0.005, 0.01, 0.015, 0.02, 0.025,
        ]);

        let var = estimate_var(&returns, 0.95);

        // h = 0.05 * 9 = 0.45 -> -0.02 + 0.45 * 0.005
        assert_relative_eq!(var.var_return, -0.01775, epsilon = 1e-12);
        assert_relative_eq!(var.amount(1_000_000.0), 17_750.0, epsilon = 1e-6);
        assert_eq!(var.instrument_id.as_str(), "SSI");
    }

    #[test]
    fn test_historical_var_empty_is_zero_sentinel() {
        let var = estimate_var(&ReturnSeries::empty("SSI"), 0.99);
        assert_eq!(var.var_return, 0.0);
        assert_eq!(var.amount(1_000_000.0), 0.0);
    }

    #[test]
    fn test_historical_var_single_return() {
        let var = estimate_var(&series(&[-0.03]), 0.95);
        assert_eq!(var.var_return, -0.03);
    }

    #[test]
    fn test_out_of_range_level_is_nan() {
        let var = estimate_var(&series(&[-0.01, 0.01]), 1.5);
        assert!(var.var_return.is_nan());
    }

    #[test]
    fn test_display() {
        let var = estimate_var(&series(&[-0.02, 0.02]), 0.95);
        assert!(var.to_string().starts_with("SSI VaR(95%, 1d):"));
    }
}
