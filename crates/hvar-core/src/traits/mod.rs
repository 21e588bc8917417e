//! Source traits.
//!
//! [`PriceSource`] is the seam between storage (CSV files, memory) and the
//! analytics crates. Analytics never read storage directly; they receive
//! price points already filtered to one instrument.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{HvarError, HvarResult};
use crate::types::{InstrumentId, PricePoint};

/// Where a price source reads its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// File-based (CSV)
    File,
    /// Held in memory (tests, embedding)
    Memory,
}

/// Provider of closing prices grouped by instrument.
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Instruments available, in the order the source first saw them.
    fn instruments(&self) -> Vec<InstrumentId>;

    /// All price points of one instrument, in storage order.
    ///
    /// # Errors
    ///
    /// Returns `HvarError::InstrumentNotFound` for an unknown instrument.
    fn prices(&self, instrument_id: &InstrumentId) -> HvarResult<Vec<PricePoint>>;

    /// Total number of price points across all instruments.
    fn len(&self) -> usize;

    /// Returns true if the source holds no price points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Price source backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPriceSource {
    order: Vec<InstrumentId>,
    prices: HashMap<InstrumentId, Vec<PricePoint>>,
}

impl InMemoryPriceSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source from price points of any number of instruments.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut source = Self::new();
        for point in points {
            source.push(point);
        }
        source
    }

    /// Adds one price point.
    pub fn push(&mut self, point: PricePoint) {
        if !self.prices.contains_key(&point.instrument_id) {
            self.order.push(point.instrument_id.clone());
        }
        self.prices
            .entry(point.instrument_id.clone())
            .or_default()
            .push(point);
    }
}

impl PriceSource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    fn instruments(&self) -> Vec<InstrumentId> {
        self.order.clone()
    }

    fn prices(&self, instrument_id: &InstrumentId) -> HvarResult<Vec<PricePoint>> {
        self.prices
            .get(instrument_id)
            .cloned()
            .ok_or_else(|| HvarError::instrument_not_found(instrument_id.as_str()))
    }

    fn len(&self) -> usize {
        self.prices.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    #[test]
    fn test_in_memory_first_seen_order() {
        let ts = Timestamp::from_ymd(2024, 1, 2).unwrap();
        let source = InMemoryPriceSource::from_points(vec![
            PricePoint::new("VNM", ts, 70.0),
            PricePoint::new("FPT", ts, 90.0),
            PricePoint::new("VNM", ts.add_days(1), 71.0),
        ]);

        assert_eq!(
            source.instruments(),
            vec![InstrumentId::new("VNM"), InstrumentId::new("FPT")]
        );
        assert_eq!(source.prices(&InstrumentId::new("VNM")).unwrap().len(), 2);
        assert_eq!(source.len(), 3);
        assert!(!source.is_empty());
    }

    #[test]
    fn test_in_memory_unknown_instrument() {
        let source = InMemoryPriceSource::new();
        let err = source.prices(&InstrumentId::new("MWG")).unwrap_err();
        assert_eq!(err, HvarError::instrument_not_found("MWG"));
        assert!(source.is_empty());
    }
}
