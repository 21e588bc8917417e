//! Observation timestamp for price data.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{HvarError, HvarResult};

/// Accepted textual layouts, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// The time at which a closing price was observed.
///
/// This is a newtype wrapper around `chrono::NaiveDateTime`. Daily data is
/// usually date-only; such values carry a midnight time component.
///
/// # Example
///
/// ```rust
/// use hvar_core::types::Timestamp;
///
/// let a = Timestamp::parse("2024-03-01").unwrap();
/// let b = Timestamp::parse("2024-03-01 15:00:00").unwrap();
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Creates a midnight timestamp from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `HvarError::InvalidTimestamp` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> HvarResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|d| Self(d.and_time(NaiveTime::MIN)))
            .ok_or_else(|| HvarError::invalid_timestamp(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses a timestamp.
    ///
    /// Accepts RFC 3339 (offset is dropped after conversion to UTC),
    /// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`, and
    /// plain `YYYY-MM-DD`.
    pub fn parse(s: &str) -> HvarResult<Self> {
        let s = s.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_utc()));
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(dt));
            }
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|d| Self(d.and_time(NaiveTime::MIN)))
            .map_err(|_| HvarError::invalid_timestamp(format!("Cannot parse: {s}")))
    }

    /// Returns this timestamp shifted by a whole number of calendar days.
    #[must_use]
    pub fn add_days(self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Returns the calendar date component.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the underlying chrono value.
    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self(dt)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(d: NaiveDate) -> Self {
        Self(d.and_time(NaiveTime::MIN))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.time() == NaiveTime::MIN {
            write!(f, "{}", self.0.format("%Y-%m-%d"))
        } else {
            write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
        }
    }
}
