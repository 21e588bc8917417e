//! CSV export of calibration results.

use std::path::Path;

use serde::Serialize;

use hvar_risk::BacktestResult;

use crate::error::{FileError, FileResult};

/// One row of the summary file.
#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    instrument_id: &'a str,
    confidence_level: f64,
    var_return: f64,
    var_amount: f64,
    sample_size: usize,
    violation_count: usize,
    violation_rate: f64,
    expected_violation_rate: f64,
    accuracy: f64,
    min_return: f64,
    max_return: f64,
    mean_return: f64,
    /// Empty when undefined (a single return).
    std_return: Option<f64>,
}

impl<'a> From<&'a BacktestResult> for SummaryRecord<'a> {
    fn from(result: &'a BacktestResult) -> Self {
        let stats = &result.return_stats;
        Self {
            instrument_id: result.instrument_id.as_str(),
            confidence_level: result.confidence_level,
            var_return: result.var_return,
            var_amount: result.var_amount,
            sample_size: result.sample_size,
            violation_count: result.violation_count,
            violation_rate: result.violation_rate,
            expected_violation_rate: result.expected_violation_rate,
            accuracy: result.accuracy,
            min_return: stats.min,
            max_return: stats.max,
            mean_return: stats.mean,
            std_return: Some(stats.std).filter(|s| s.is_finite()),
        }
    }
}

/// Writes one row per result, with a header, to `path`.
///
/// An existing file is overwritten. An empty slice writes nothing at all,
/// not even a header.
///
/// # Errors
///
/// Returns `FileError::Io` if the file cannot be created or written.
pub fn write_summary_csv(path: impl AsRef<Path>, results: &[BacktestResult]) -> FileResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).map_err(|e| FileError::io(path, e))?;

    for result in results {
        writer
            .serialize(SummaryRecord::from(result))
            .map_err(|e| FileError::io(path, e))?;
    }
    writer.flush().map_err(|e| FileError::io(path, e))?;

    log::info!("wrote {} results to {}", results.len(), path.display());
    Ok(())
}
