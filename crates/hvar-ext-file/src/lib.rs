//! # hvar-ext-file
//!
//! File-based price ingestion and result export.
//!
//! - [`CsvPriceSource`]: closing prices from a `ticker,time,close` CSV file
//! - [`write_summary_csv`]: one row per instrument's calibrated result

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod market_data;

pub use error::{FileError, FileResult};
pub use export::write_summary_csv;
pub use market_data::CsvPriceSource;
