//! Instrument identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HvarError, HvarResult};

/// Instrument identifier (exchange ticker or internal ID).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create a new instrument ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parses an identifier read from external data.
    ///
    /// Surrounding whitespace is removed.
    ///
    /// # Errors
    ///
    /// Returns `HvarError::InvalidInstrument` if nothing is left, or if the
    /// identifier contains interior whitespace.
    pub fn parse(raw: &str) -> HvarResult<Self> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(HvarError::invalid_instrument("identifier is empty"));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(HvarError::invalid_instrument(format!(
                "'{id}' contains whitespace"
            )));
        }
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for InstrumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_conversions() {
        let id = InstrumentId::from("HPG");
        assert_eq!(id.to_string(), "HPG");
        assert_eq!(id, InstrumentId::new(String::from("HPG")));
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(InstrumentId::parse("  VNM ").unwrap(), InstrumentId::new("VNM"));
    }

    #[test]
    fn test_parse_rejects_blank_and_spaced() {
        assert!(matches!(
            InstrumentId::parse("   "),
            Err(HvarError::InvalidInstrument { .. })
        ));
        assert!(matches!(
            InstrumentId::parse("V NM"),
            Err(HvarError::InvalidInstrument { .. })
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let id = InstrumentId::new("VIC");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"VIC\"");
    }
}
