//! Error types for the hvar library.
//!
//! Only genuine faults live here. Running out of data for an instrument is
//! not an error; see [`crate::outcome::Assessment`].

use thiserror::Error;

/// A specialized Result type for hvar core operations.
pub type HvarResult<T> = Result<T, HvarError>;

/// The main error type for hvar core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HvarError {
    /// A timestamp could not be parsed or constructed.
    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp {
        /// Description of the timestamp error.
        message: String,
    },

    /// An instrument identifier was empty or malformed.
    #[error("Invalid instrument id: {reason}")]
    InvalidInstrument {
        /// Reason for invalidity.
        reason: String,
    },

    /// The requested instrument is not known to the price source.
    #[error("Instrument not found: {instrument_id}")]
    InstrumentNotFound {
        /// Identifier of the missing instrument.
        instrument_id: String,
    },
}

impl HvarError {
    /// Creates an invalid timestamp error.
    #[must_use]
    pub fn invalid_timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            message: message.into(),
        }
    }

    /// Creates an instrument-not-found error.
    #[must_use]
    pub fn instrument_not_found(instrument_id: impl Into<String>) -> Self {
        Self::InstrumentNotFound {
            instrument_id: instrument_id.into(),
        }
    }

    /// Creates an invalid instrument error.
    #[must_use]
    pub fn invalid_instrument(reason: impl Into<String>) -> Self {
        Self::InvalidInstrument {
            reason: reason.into(),
        }
    }
}
