//! Empirical quantiles.
//!
//! Uses the linear-interpolation definition (Hyndman & Fan type 7), which is
//! the default of numpy's `percentile`/`quantile`, R's `quantile`, and
//! pandas' `Series.quantile`. For a sorted sample `x[0..n]` and probability
//! `q`, the virtual index is `h = q * (n - 1)` and the quantile is read off
//! the piecewise-linear curve through `(i, x[i])`.

use crate::error::{MathError, MathResult};

/// Returns a copy of `data` sorted ascending.
///
/// Uses IEEE total ordering, so NaN values (if any) sort last.
pub fn sort_ascending(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of an unsorted sample.
///
/// # Arguments
///
/// * `data` - Sample values in any order
/// * `q` - Probability in `[0, 1]`
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty sample and
/// `MathError::InvalidInput` if `q` is outside `[0, 1]`.
///
/// # Example
///
/// ```rust
/// use hvar_math::statistics::quantile_linear;
///
/// let q = quantile_linear(&[4.0, 1.0, 3.0, 2.0], 0.5).unwrap();
/// assert!((q - 2.5).abs() < 1e-12);
/// ```
pub fn quantile_linear(data: &[f64], q: f64) -> MathResult<f64> {
    quantile_sorted(&sort_ascending(data), q)
}

/// Quantile of a sample that is already sorted ascending.
///
/// # Errors
///
/// Same as [`quantile_linear`].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> MathResult<f64> {
    if sorted.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&q) {
        return Err(MathError::invalid_input(format!(
            "quantile probability must be in [0, 1], got {q}"
        )));
    }

    let last = sorted.len() - 1;
    let h = q * last as f64;
    let lo = (h.floor() as usize).min(last);
    if lo == last {
        return Ok(sorted[last]);
    }

    let (below, above) = (sorted[lo], sorted[lo + 1]);
    Ok(below + (h - lo as f64) * (above - below))
}
