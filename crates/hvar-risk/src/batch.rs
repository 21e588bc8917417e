//! Multi-instrument runs.
//!
//! Instruments are analysed independently of one another. Large runs fan
//! out over the rayon thread pool; results always come back in input order.

use hvar_core::{Assessment, PriceSource, ReturnSeries};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::RiskResult;
use crate::optimizer::{find_optimal, OptimalResult};
use crate::returns::build_return_series;
use crate::var::{estimate_var, VaREstimate};

/// When to run per-instrument work in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Enable parallel processing.
    pub enabled: bool,
    /// Minimum instrument count to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub threshold: usize,
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 8,
        }
    }
}

impl ParallelPolicy {
    /// A policy that never parallelises.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        self.enabled && count >= self.threshold
    }
}

fn maybe_parallel_map<T, U, F>(items: &[T], policy: ParallelPolicy, f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    if policy.should_parallelize(items.len()) {
        return items.par_iter().map(f).collect();
    }
    items.iter().map(f).collect()
}

/// Builds the return series of every instrument a source offers.
///
/// Series come back in the source's instrument order. An instrument with
/// too few prices yields an empty series rather than being dropped.
///
/// # Errors
///
/// Returns an error if the source fails to load an instrument's prices.
pub fn build_all(source: &dyn PriceSource) -> RiskResult<Vec<ReturnSeries>> {
    let instruments = source.instruments();
    log::debug!(
        "building return series for {} instruments ({:?} source)",
        instruments.len(),
        source.source_type()
    );

    instruments
        .into_iter()
        .map(|id| -> RiskResult<ReturnSeries> {
            let prices = source.prices(&id)?;
            Ok(build_return_series(id, &prices))
        })
        .collect()
}

/// Calibrates every instrument against the same confidence-level grid.
///
/// The output is positionally aligned with `series`.
pub fn analyze_instruments(
    series: &[ReturnSeries],
    confidence_levels: &[f64],
    portfolio_value: f64,
    policy: ParallelPolicy,
) -> Vec<Assessment<OptimalResult>> {
    log::info!(
        "analysing {} instruments over {} confidence levels{}",
        series.len(),
        confidence_levels.len(),
        if policy.should_parallelize(series.len()) {
            " in parallel"
        } else {
            ""
        }
    );

    maybe_parallel_map(series, policy, |returns| {
        find_optimal(returns, confidence_levels, portfolio_value)
    })
}

/// Estimates VaR at a single confidence level for every instrument.
///
/// Instruments without returns are omitted.
pub fn estimate_all(series: &[ReturnSeries], confidence_level: f64) -> Vec<VaREstimate> {
    series
        .iter()
        .filter(|returns| {
            if returns.is_empty() {
                log::debug!("{}: no returns, skipped", returns.instrument_id());
                return false;
            }
            true
        })
        .map(|returns| estimate_var(returns, confidence_level))
        .collect()
}
