//! CLI error types.

use thiserror::Error;

use hvar_config::ConfigError;
use hvar_ext_file::FileError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Confidence level outside (0, 1).
    #[error("Invalid confidence level: {0}. Must be between 0 and 1 exclusive.")]
    InvalidConfidenceLevel(f64),

    /// Non-positive portfolio value.
    #[error("Invalid portfolio value: {0}. Must be positive.")]
    InvalidPortfolioValue(f64),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Data file error.
    #[error("Data file error: {0}")]
    File(#[from] FileError),

    /// Target file already exists.
    #[error("{0} already exists. Use --force to overwrite.")]
    AlreadyExists(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
