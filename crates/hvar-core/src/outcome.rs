//! Result-or-reason outcomes for per-instrument analytics.
//!
//! An instrument without enough history is not a fault: the run carries on
//! with the other instruments. [`Assessment`] keeps that case in the type so
//! "no data" can never be read as "zero risk".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::InstrumentId;

/// Why an instrument could not be assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsufficiencyReason {
    /// The return series holds no returns.
    EmptyReturnSeries,
    /// No candidate confidence level produced a result.
    NoUsableConfidenceLevel,
}

impl fmt::Display for InsufficiencyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyReturnSeries => f.write_str("no returns available"),
            Self::NoUsableConfidenceLevel => f.write_str("no confidence level could be evaluated"),
        }
    }
}

/// Marker for an instrument that lacks the data to be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsufficientData {
    /// The instrument concerned.
    pub instrument_id: InstrumentId,
    /// What was missing.
    pub reason: InsufficiencyReason,
}

impl InsufficientData {
    /// Creates a new insufficient-data marker.
    pub fn new(instrument_id: InstrumentId, reason: InsufficiencyReason) -> Self {
        Self {
            instrument_id,
            reason,
        }
    }
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: insufficient data ({})", self.instrument_id, self.reason)
    }
}

/// Outcome of analysing one instrument: a value, or a reason it has none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Assessment<T> {
    /// The analysis produced a value.
    Ready(T),
    /// The instrument could not be analysed.
    Insufficient(InsufficientData),
}

impl<T> Assessment<T> {
    /// Creates an insufficient-data outcome.
    pub fn insufficient(instrument_id: InstrumentId, reason: InsufficiencyReason) -> Self {
        Self::Insufficient(InsufficientData::new(instrument_id, reason))
    }

    /// Returns true if a value is present.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns true if the instrument lacked data.
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Self::Insufficient(_))
    }

    /// Borrows the value, if any.
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Insufficient(_) => None,
        }
    }

    /// Converts into the value, discarding the reason.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Insufficient(_) => None,
        }
    }

    /// Maps the ready value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Assessment<U> {
        match self {
            Self::Ready(v) => Assessment::Ready(f(v)),
            Self::Insufficient(i) => Assessment::Insufficient(i),
        }
    }

    /// Converts into a `Result`, treating insufficiency as the error side.
    pub fn into_result(self) -> Result<T, InsufficientData> {
        match self {
            Self::Ready(v) => Ok(v),
            Self::Insufficient(i) => Err(i),
        }
    }
}
