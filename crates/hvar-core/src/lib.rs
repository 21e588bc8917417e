//! # hvar Core
//!
//! Core types, outcomes, and abstractions for the hvar historical
//! Value-at-Risk toolkit.
//!
//! This crate provides the foundational building blocks used throughout hvar:
//!
//! - **Types**: `InstrumentId`, `Timestamp`, `PricePoint`, `ReturnSeries`
//! - **Outcomes**: [`Assessment`], the tagged "result or insufficient data" value
//! - **Traits**: [`PriceSource`], the seam between storage and analytics
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes prevent mixing identifiers and timestamps
//! - **Immutable Values**: Every entity is built once and never mutated
//! - **No Sentinels for Missing Data**: Absence of data is a variant, not a zero
//!
//! ## Example
//!
//! ```rust
//! use hvar_core::prelude::*;
//!
//! let ts = Timestamp::parse("2024-01-15").unwrap();
//! let point = PricePoint::new("VNM", ts, 71_500.0);
//! assert_eq!(point.instrument_id.as_str(), "VNM");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod outcome;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{HvarError, HvarResult};
    pub use crate::outcome::{Assessment, InsufficiencyReason, InsufficientData};
    pub use crate::traits::{InMemoryPriceSource, PriceSource};
    pub use crate::types::{InstrumentId, PricePoint, ReturnPoint, ReturnSeries, Timestamp};
}

pub use error::{HvarError, HvarResult};
pub use outcome::{Assessment, InsufficiencyReason, InsufficientData};
pub use traits::{InMemoryPriceSource, PriceSource, SourceType};
pub use types::{InstrumentId, PricePoint, ReturnPoint, ReturnSeries, Timestamp};
