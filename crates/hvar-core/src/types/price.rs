//! Closing price observation.

use serde::{Deserialize, Serialize};

use super::{InstrumentId, Timestamp};

/// A single closing price for one instrument at one point in time.
///
/// Price points are the source of truth for every downstream calculation and
/// are never modified after ingestion. A point may carry a non-positive or
/// non-finite close (bad vendor data); the return builder drops any return
/// that touches such a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Instrument the price belongs to.
    pub instrument_id: InstrumentId,
    /// Observation time.
    pub timestamp: Timestamp,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    pub fn new(instrument_id: impl Into<InstrumentId>, timestamp: Timestamp, close: f64) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            timestamp,
            close,
        }
    }

    /// Returns true if the close can anchor a simple return.
    pub fn is_usable(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_prices() {
        let ts = Timestamp::from_ymd(2024, 1, 2).unwrap();
        assert!(PricePoint::new("A", ts, 10.0).is_usable());
        assert!(!PricePoint::new("A", ts, 0.0).is_usable());
        assert!(!PricePoint::new("A", ts, -1.0).is_usable());
        assert!(!PricePoint::new("A", ts, f64::NAN).is_usable());
        assert!(!PricePoint::new("A", ts, f64::INFINITY).is_usable());
    }
}
