//! CLI command implementations.

pub mod backtest;
pub mod config;
pub mod var;

// Re-export submodules for convenience
pub use backtest::BacktestArgs;
pub use config::ConfigArgs;
pub use var::VarArgs;

use std::path::Path;

use hvar_config::BacktestConfig;
use hvar_core::{PriceSource, ReturnSeries};
use hvar_ext_file::CsvPriceSource;
use hvar_risk::build_all;

use crate::error::{CliError, CliResult};

/// Validates a confidence level.
pub fn validate_confidence_level(level: f64) -> CliResult<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(CliError::InvalidConfidenceLevel(level));
    }
    Ok(level)
}

/// Validates a portfolio value.
pub fn validate_portfolio_value(value: f64) -> CliResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CliError::InvalidPortfolioValue(value));
    }
    Ok(value)
}

/// Loads the run configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> CliResult<BacktestConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from {}", path.display());
            Ok(BacktestConfig::from_file(path)?)
        }
        None => Ok(BacktestConfig::default()),
    }
}

/// Loads a price file and builds the return series of every instrument in it.
pub fn load_return_series(data: &Path) -> anyhow::Result<Vec<ReturnSeries>> {
    let source = CsvPriceSource::new(data).map_err(CliError::from)?;
    tracing::info!(
        "Loaded {} prices for {} instruments from {}",
        source.len(),
        source.instruments().len(),
        source.path().display()
    );
    Ok(build_all(&source)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_confidence_level() {
        assert!(validate_confidence_level(0.95).is_ok());
        assert!(validate_confidence_level(0.0).is_err());
        assert!(validate_confidence_level(1.0).is_err());
        assert!(validate_confidence_level(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_portfolio_value() {
        assert!(validate_portfolio_value(1e6).is_ok());
        assert!(validate_portfolio_value(0.0).is_err());
        assert!(validate_portfolio_value(f64::INFINITY).is_err());
    }
}
