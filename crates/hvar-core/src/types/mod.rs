//! Domain types for historical VaR analytics.
//!
//! - [`InstrumentId`]: Ticker or internal identifier of a traded instrument
//! - [`Timestamp`]: Observation time of a closing price
//! - [`PricePoint`]: One closing price observation
//! - [`ReturnSeries`]: Chronological daily simple returns for one instrument

mod instrument;
mod price;
mod returns;
mod timestamp;

pub use instrument::InstrumentId;
pub use price::PricePoint;
pub use returns::{ReturnPoint, ReturnSeries};
pub use timestamp::Timestamp;
