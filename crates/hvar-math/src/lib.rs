//! # hvar Math
//!
//! Numerical primitives for the hvar historical VaR toolkit.
//!
//! This crate provides:
//!
//! - **Quantiles**: Linear-interpolation empirical quantiles (R type 7, the
//!   default of numpy's `percentile`)
//! - **Summary statistics**: min, max, mean, and sample standard deviation
//!
//! ## Design Philosophy
//!
//! - **Reference Parity**: Quantiles match the common statistics packages
//! - **Honest Degeneracy**: Undefined statistics are NaN, never silently zero

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

pub mod error;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::statistics::{quantile_linear, quantile_sorted, SummaryStatistics};
}

pub use error::{MathError, MathResult};
