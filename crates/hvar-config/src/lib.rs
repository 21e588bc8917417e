//! # hvar-config
//!
//! Run configuration for historical VaR backtesting.
//!
//! [`BacktestConfig`] holds the portfolio value, the candidate confidence
//! levels, the parallelism policy and the export path. It loads from TOML,
//! falls back to defaults for any key a file omits, and validates through
//! the [`Validate`] trait before a run starts.
//!
//! # Example
//!
//! ```rust
//! use hvar_config::{BacktestConfig, Validate};
//!
//! let config = BacktestConfig::from_toml_str("portfolio_value = 2.5e9").unwrap();
//! assert!(config.is_valid());
//! assert_eq!(config.confidence_levels.len(), 10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod backtest;
mod error;

pub use backtest::BacktestConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::backtest::BacktestConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
