//! Error types for risk calculations.
//!
//! Insufficient history is an outcome, not an error; see
//! [`hvar_core::Assessment`].

use hvar_core::HvarError;
use thiserror::Error;

/// A specialized Result type for risk calculations.
pub type RiskResult<T> = Result<T, RiskError>;

/// Errors that can occur during risk calculations.
#[derive(Debug, Error)]
pub enum RiskError {
    /// Price source failed
    #[error("price source error: {0}")]
    Source(#[from] HvarError),
}
