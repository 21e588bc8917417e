//! File-based price sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use hvar_core::{
    HvarResult, InMemoryPriceSource, InstrumentId, PricePoint, PriceSource, SourceType, Timestamp,
};

use crate::error::{FileError, FileResult};

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for closing prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    time: String,
    close: Option<f64>,
}

/// CSV-based closing-price source.
///
/// Expects a header row with at least `ticker`, `time` and `close`; other
/// columns are ignored. The whole file is loaded on construction.
/// Instruments are listed in order of first appearance. A blank `close`
/// cell is kept as a NaN price, which the return builder treats as
/// unusable.
#[derive(Debug, Clone)]
pub struct CsvPriceSource {
    file_path: PathBuf,
    prices: InMemoryPriceSource,
}

impl CsvPriceSource {
    /// Loads a price file.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Io` if the file cannot be opened and
    /// `FileError::Parse` for a malformed row, ticker or timestamp.
    pub fn new(file_path: impl AsRef<Path>) -> FileResult<Self> {
        let file_path = file_path.as_ref().to_path_buf();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&file_path)
            .map_err(|e| FileError::io(&file_path, e))?;

        let mut prices = InMemoryPriceSource::new();
        let mut blank = 0usize;
        // Line 1 is the header.
        for (line, result) in (2u64..).zip(reader.deserialize()) {
            let record: PriceRecord = result.map_err(|e| {
                let line = e.position().map_or(line, csv::Position::line);
                FileError::parse(&file_path, line, e.to_string())
            })?;

            let instrument_id = InstrumentId::parse(&record.ticker)
                .map_err(|e| FileError::parse(&file_path, line, e.to_string()))?;
            let timestamp = Timestamp::parse(&record.time)
                .map_err(|e| FileError::parse(&file_path, line, e.to_string()))?;
            let close = record.close.unwrap_or_else(|| {
                blank += 1;
                f64::NAN
            });

            prices.push(PricePoint::new(instrument_id, timestamp, close));
        }

        if blank > 0 {
            log::warn!("{}: {blank} rows with a blank close", file_path.display());
        }
        log::debug!(
            "loaded {} prices for {} instruments from {}",
            prices.len(),
            prices.instruments().len(),
            file_path.display()
        );

        Ok(Self { file_path, prices })
    }

    /// Path the prices were loaded from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    fn instruments(&self) -> Vec<InstrumentId> {
        self.prices.instruments()
    }

    fn prices(&self, instrument_id: &InstrumentId) -> HvarResult<Vec<PricePoint>> {
        self.prices.prices(instrument_id)
    }

    fn len(&self) -> usize {
        self.prices.len()
    }
}
