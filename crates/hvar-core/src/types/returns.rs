//! Daily simple-return series.

use serde::{Deserialize, Serialize};

use super::{InstrumentId, Timestamp};

/// One simple return, stamped with the later of the two observations it spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Timestamp of the closing price the return ends on.
    pub timestamp: Timestamp,
    /// Fractional simple return, e.g. `-0.012` for -1.2%.
    pub value: f64,
}

impl ReturnPoint {
    /// Creates a new return point.
    pub fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Chronologically ordered simple returns for a single instrument.
///
/// Invariants, enforced at construction:
///
/// - entries are in ascending timestamp order (ties keep input order);
/// - every stored value is finite.
///
/// An empty series is a valid value: it is what a single price point, or an
/// instrument whose prices are all unusable, produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    instrument_id: InstrumentId,
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Creates a series from return points in any order.
    ///
    /// Points are stably sorted by timestamp and non-finite values are dropped.
    pub fn new(instrument_id: impl Into<InstrumentId>, mut points: Vec<ReturnPoint>) -> Self {
        points.retain(|p| p.value.is_finite());
        points.sort_by_key(|p| p.timestamp);
        Self {
            instrument_id: instrument_id.into(),
            points,
        }
    }

    /// Creates an empty series.
    pub fn empty(instrument_id: impl Into<InstrumentId>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            points: Vec::new(),
        }
    }

    /// Returns the instrument this series belongs to.
    pub fn instrument_id(&self) -> &InstrumentId {
        &self.instrument_id
    }

    /// Returns the return points in chronological order.
    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// Iterates over the return values in chronological order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    /// Copies the return values into a vector.
    pub fn to_values(&self) -> Vec<f64> {
        self.values().collect()
    }

    /// Number of returns in the series.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no returns.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamp of the first return, if any.
    pub fn start(&self) -> Option<Timestamp> {
        self.points.first().map(|p| p.timestamp)
    }

    /// Timestamp of the last return, if any.
    pub fn end(&self) -> Option<Timestamp> {
        self.points.last().map(|p| p.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Timestamp {
        Timestamp::from_ymd(2024, 1, d).unwrap()
    }

    #[test]
    fn test_new_sorts_chronologically() {
        let series = ReturnSeries::new(
            "ACB",
            vec![
                ReturnPoint::new(day(5), 0.03),
                ReturnPoint::new(day(3), 0.01),
                ReturnPoint::new(day(4), 0.02),
            ],
        );

        assert_eq!(series.to_values(), vec![0.01, 0.02, 0.03]);
        assert_eq!(series.start(), Some(day(3)));
        assert_eq!(series.end(), Some(day(5)));
    }

    #[test]
    fn test_new_drops_non_finite() {
        let series = ReturnSeries::new(
            "ACB",
            vec![
                ReturnPoint::new(day(2), f64::NAN),
                ReturnPoint::new(day(3), f64::INFINITY),
                ReturnPoint::new(day(4), -0.01),
            ],
        );

        assert_eq!(series.len(), 1);
        assert_eq!(series.to_values(), vec![-0.01]);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let series = ReturnSeries::new(
            "ACB",
            vec![
                ReturnPoint::new(day(2), 0.5),
                ReturnPoint::new(day(2), -0.5),
            ],
        );

        assert_eq!(series.to_values(), vec![0.5, -0.5]);
    }

    #[test]
    fn test_empty() {
        let series = ReturnSeries::empty("ACB");
        assert!(series.is_empty());
        assert_eq!(series.start(), None);
        assert_eq!(series.instrument_id().as_str(), "ACB");
    }
}
