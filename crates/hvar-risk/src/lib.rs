//! # hvar-risk
//!
//! Historical-simulation Value-at-Risk for traded instruments, with a
//! backtest of each estimate against realized returns.
//!
//! This crate provides:
//!
//! - **Returns**: daily simple returns from raw closing prices
//! - **VaR**: the empirical `(1 - c)` return quantile at confidence level `c`
//! - **Backtesting**: violation counts and calibration accuracy of an estimate
//! - **Calibration**: the best-calibrated level from a candidate grid
//! - **Batch**: per-instrument analysis over many instruments, in parallel
//! - **Summary**: cross-instrument aggregates of the calibrated results
//!
//! Every calculation is a pure function of its arguments. Instruments are
//! independent of one another, so a run over many instruments parallelises
//! without coordination.
//!
//! ## Example
//!
//! ```rust
//! use hvar_core::{Assessment, PricePoint, Timestamp};
//! use hvar_risk::prelude::*;
//!
//! let start = Timestamp::from_ymd(2024, 1, 1).unwrap();
//! let prices: Vec<PricePoint> = [100.0, 102.0, 101.0, 105.0, 103.0]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &close)| PricePoint::new("VNM", start.add_days(i as i64), close))
//!     .collect();
//!
//! let returns = build_return_series("VNM", &prices);
//! let grid = default_confidence_levels();
//!
//! if let Assessment::Ready(optimal) = find_optimal(&returns, &grid, 1_000_000.0) {
//!     println!("best level: {}", optimal.optimal.confidence_level);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod backtest;
pub mod batch;
mod error;
pub mod optimizer;
pub mod returns;
pub mod summary;
pub mod var;

pub use error::{RiskError, RiskResult};

pub use backtest::{backtest, BacktestResult, ReturnStats};
pub use batch::{analyze_instruments, build_all, estimate_all, ParallelPolicy};
pub use optimizer::{default_confidence_levels, find_optimal, OptimalResult};
pub use returns::build_return_series;
pub use summary::{LevelCount, RiskRanking, RunSummary};
pub use var::{estimate_var, VaREstimate};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::backtest::{backtest, BacktestResult, ReturnStats};
    pub use crate::batch::{analyze_instruments, build_all, estimate_all, ParallelPolicy};
    pub use crate::optimizer::{default_confidence_levels, find_optimal, OptimalResult};
    pub use crate::returns::build_return_series;
    pub use crate::summary::RunSummary;
    pub use crate::var::{estimate_var, VaREstimate};
    pub use crate::{RiskError, RiskResult};
}
