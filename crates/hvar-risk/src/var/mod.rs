//! Value at Risk (VaR) estimation.
//!
//! VaR here is the historical-simulation estimate: the empirical quantile of
//! an instrument's one-day returns, read directly from history with no
//! distributional assumption.

mod historical;

pub use historical::*;

use hvar_core::InstrumentId;
use serde::{Deserialize, Serialize};

/// Historical VaR estimate for one instrument at one confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaREstimate {
    /// Instrument the estimate belongs to.
    pub instrument_id: InstrumentId,
    /// Confidence level (e.g., 0.95 for 95%).
    pub confidence_level: f64,
    /// The `(1 - confidence_level)` return quantile, as a signed fraction.
    ///
    /// Usually negative. `0.0` when the return series is empty.
    pub var_return: f64,
}

impl VaREstimate {
    /// Loss amount implied by the estimate for a position of the given value.
    pub fn amount(&self, portfolio_value: f64) -> f64 {
        self.var_return.abs() * portfolio_value
    }

    /// Probability with which the estimate is expected to be breached.
    pub fn tail_probability(&self) -> f64 {
        1.0 - self.confidence_level
    }
}

impl std::fmt::Display for VaREstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} VaR({:.0}%, 1d): {:.4}%",
            self.instrument_id,
            self.confidence_level * 100.0,
            self.var_return * 100.0
        )
    }
}
