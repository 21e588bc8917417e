//! VaR command implementation.
//!
//! Estimates historical VaR at a single confidence level for every
//! instrument in a price file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hvar_risk::{estimate_all, VaREstimate};

use crate::cli::OutputFormat;
use crate::commands::{
    load_config, load_return_series, validate_confidence_level, validate_portfolio_value,
};
use crate::output::{format_amount, format_percent, print_header, print_output};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Price file (CSV with ticker, time, close columns)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Run configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Confidence level (e.g., 0.95). Defaults to the configured level.
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Portfolio value VaR amounts are expressed against
    #[arg(short, long, env = "HVAR_PORTFOLIO_VALUE")]
    pub portfolio_value: Option<f64>,
}

/// One row of the VaR table.
#[derive(Debug, Serialize, Tabled)]
struct VarRow {
    #[tabled(rename = "Instrument")]
    instrument_id: String,
    #[tabled(rename = "Confidence", display_with = "display_level")]
    confidence_level: f64,
    #[tabled(rename = "VaR (%)", display_with = "display_percent")]
    var_return: f64,
    #[tabled(rename = "VaR Amount", display_with("display_amount", self))]
    var_amount: f64,
    #[tabled(skip)]
    #[serde(skip)]
    currency: String,
}

fn display_level(level: &f64) -> String {
    format_percent(*level, 1)
}

fn display_percent(value: &f64) -> String {
    format_percent(*value, 4)
}

fn display_amount(row: &VarRow) -> String {
    format_amount(row.var_amount, &row.currency)
}

impl VarRow {
    fn new(estimate: &VaREstimate, portfolio_value: f64, currency: &str) -> Self {
        Self {
            instrument_id: estimate.instrument_id.to_string(),
            confidence_level: estimate.confidence_level,
            var_return: estimate.var_return,
            var_amount: estimate.amount(portfolio_value),
            currency: currency.to_string(),
        }
    }
}

/// Execute the var command.
pub fn execute(args: VarArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let confidence =
        validate_confidence_level(args.confidence.unwrap_or(config.single_confidence_level))?;
    let portfolio_value =
        validate_portfolio_value(args.portfolio_value.unwrap_or(config.portfolio_value))?;

    let series = load_return_series(&args.data)?;
    let estimates = estimate_all(&series, confidence);
    let rows: Vec<VarRow> = estimates
        .iter()
        .map(|e| VarRow::new(e, portfolio_value, &config.currency))
        .collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "Historical VaR at {} ({} position)",
                format_percent(confidence, 1),
                format_amount(portfolio_value, &config.currency)
            ));
            print_output(&rows, format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&rows, format)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!("{} {:.6}", row.instrument_id, row.var_return);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hvar_core::InstrumentId;

    #[test]
    fn test_amount_column_is_grouped_with_currency() {
        let estimate = VaREstimate {
            instrument_id: InstrumentId::new("VNM"),
            confidence_level: 0.95,
            var_return: -0.017_661_064_4,
        };
        let row = VarRow::new(&estimate, 1_000_000.0, "VND");

        assert_eq!(display_amount(&row), "17,661 VND");
    }
}
