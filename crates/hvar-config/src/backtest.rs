//! Backtest run configuration.

use std::path::Path;

use hvar_risk::{default_confidence_levels, ParallelPolicy};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Settings for a calibration run over many instruments.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
///
/// ```toml
/// portfolio_value = 500000000.0
/// confidence_levels = [0.95, 0.975, 0.99]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// Position value each instrument's VaR is expressed against.
    #[serde(default = "default_portfolio_value")]
    pub portfolio_value: f64,

    /// Currency label of `portfolio_value`, for display only.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Candidate confidence levels for calibration.
    #[serde(default = "default_confidence_levels")]
    pub confidence_levels: Vec<f64>,

    /// Level used for single-level VaR tables.
    #[serde(default = "default_single_confidence_level")]
    pub single_confidence_level: f64,

    /// Enable parallel processing across instruments.
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum instrument count to trigger parallel processing.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,

    /// Where the summary CSV is written.
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_portfolio_value() -> f64 {
    1_000_000.0
}

fn default_currency() -> String {
    "VND".to_string()
}

fn default_single_confidence_level() -> f64 {
    0.95
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    8
}

fn default_output_path() -> String {
    "var_backtest_results.csv".to_string()
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            portfolio_value: default_portfolio_value(),
            currency: default_currency(),
            confidence_levels: default_confidence_levels(),
            single_confidence_level: default_single_confidence_level(),
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
            output_path: default_output_path(),
        }
    }
}

impl BacktestConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure. The loaded values are not validated.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Deserialization` for malformed input.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialization` if rendering fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    /// Sets the portfolio value.
    #[must_use]
    pub fn with_portfolio_value(mut self, value: f64) -> Self {
        self.portfolio_value = value;
        self
    }

    /// Sets the currency label.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Sets the candidate confidence levels.
    #[must_use]
    pub fn with_confidence_levels(mut self, levels: Vec<f64>) -> Self {
        self.confidence_levels = levels;
        self
    }

    /// Sets the single-table confidence level.
    #[must_use]
    pub fn with_single_confidence_level(mut self, level: f64) -> Self {
        self.single_confidence_level = level;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the summary output path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = path.into();
        self
    }

    /// The parallelism policy these settings describe.
    pub fn parallel_policy(&self) -> ParallelPolicy {
        ParallelPolicy {
            enabled: self.parallel,
            threshold: self.parallel_threshold,
        }
    }
}

fn is_open_unit(level: f64) -> bool {
    level > 0.0 && level < 1.0
}

impl Validate for BacktestConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.portfolio_value.is_finite() || self.portfolio_value <= 0.0 {
            errors.push(ValidationError::with_rule(
                "portfolio_value",
                format!("Portfolio value {} must be positive", self.portfolio_value),
                "positive",
            ));
        }

        if self.currency.is_empty() {
            errors.push(ValidationError::new("currency", "Currency cannot be empty"));
        }

        if self.confidence_levels.is_empty() {
            errors.push(ValidationError::with_rule(
                "confidence_levels",
                "At least one confidence level is required",
                "non_empty",
            ));
        }

        for (i, &level) in self.confidence_levels.iter().enumerate() {
            if !is_open_unit(level) {
                errors.push(ValidationError::with_rule(
                    format!("confidence_levels[{i}]"),
                    format!("Confidence level {level} must be between 0 and 1 exclusive"),
                    "open_unit_interval",
                ));
            }
        }

        if !is_open_unit(self.single_confidence_level) {
            errors.push(ValidationError::with_rule(
                "single_confidence_level",
                format!(
                    "Confidence level {} must be between 0 and 1 exclusive",
                    self.single_confidence_level
                ),
                "open_unit_interval",
            ));
        }

        if self.output_path.trim().is_empty() {
            errors.push(ValidationError::new(
                "output_path",
                "Output path cannot be empty",
            ));
        }

        errors
    }
}
