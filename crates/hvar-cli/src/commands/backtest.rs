//! Backtest command implementation.
//!
//! Calibrates every instrument in a price file against a grid of
//! confidence levels, reports each instrument and the run as a whole, and
//! exports the optimal results to CSV.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use hvar_config::{BacktestConfig, Validate};
use hvar_core::{Assessment, InsufficientData};
use hvar_ext_file::write_summary_csv;
use hvar_risk::{analyze_instruments, BacktestResult, OptimalResult, RiskRanking, RunSummary};

use crate::cli::OutputFormat;
use crate::commands::{load_config, load_return_series};
use crate::error::CliError;
use crate::output::{
    format_amount, format_percent, print_csv, print_divider, print_header, print_json,
    print_output, print_success, print_warning, KeyValue,
};

/// Arguments for the backtest command.
#[derive(Args, Debug)]
pub struct BacktestArgs {
    /// Price file (CSV with ticker, time, close columns)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Run configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Portfolio value VaR amounts are expressed against
    #[arg(short, long, env = "HVAR_PORTFOLIO_VALUE")]
    pub portfolio_value: Option<f64>,

    /// Candidate confidence levels, comma-separated (e.g., 0.95,0.975,0.99)
    #[arg(short, long, value_delimiter = ',')]
    pub levels: Vec<f64>,

    /// Summary CSV path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip the summary CSV export
    #[arg(long)]
    pub no_export: bool,

    /// Analyse instruments one at a time
    #[arg(long)]
    pub sequential: bool,
}

impl BacktestArgs {
    /// Applies command-line overrides on top of a loaded configuration.
    fn apply(&self, mut config: BacktestConfig) -> BacktestConfig {
        if let Some(value) = self.portfolio_value {
            config = config.with_portfolio_value(value);
        }
        if !self.levels.is_empty() {
            config = config.with_confidence_levels(self.levels.clone());
        }
        if let Some(ref output) = self.output {
            config = config.with_output_path(output.clone());
        }
        if self.sequential {
            config = config.with_parallel(false);
        }
        config
    }
}

/// One candidate level of one instrument.
#[derive(Debug, Serialize, Tabled)]
struct LevelRow {
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "VaR (%)")]
    var: String,
    #[tabled(rename = "VaR Amount")]
    amount: String,
    #[tabled(rename = "Violations")]
    violations: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Expected")]
    expected: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "")]
    marker: String,
}

impl LevelRow {
    fn new(result: &BacktestResult, optimal: bool, currency: &str) -> Self {
        Self {
            level: format_percent(result.confidence_level, 1),
            var: format_percent(result.var_return, 4),
            amount: format_amount(result.var_amount, currency),
            violations: format!("{}/{}", result.violation_count, result.sample_size),
            rate: format_percent(result.violation_rate, 2),
            expected: format_percent(result.expected_violation_rate, 2),
            accuracy: format!("{:.4}", result.accuracy),
            marker: if optimal { "★".to_string() } else { String::new() },
        }
    }
}

/// Flat row of an instrument's optimal result, for CSV output.
#[derive(Debug, Serialize)]
struct OptimalRow<'a> {
    instrument_id: &'a str,
    confidence_level: f64,
    var_return: f64,
    var_amount: f64,
    sample_size: usize,
    violation_count: usize,
    violation_rate: f64,
    expected_violation_rate: f64,
    accuracy: f64,
}

impl<'a> From<&'a BacktestResult> for OptimalRow<'a> {
    fn from(r: &'a BacktestResult) -> Self {
        Self {
            instrument_id: r.instrument_id.as_str(),
            confidence_level: r.confidence_level,
            var_return: r.var_return,
            var_amount: r.var_amount,
            sample_size: r.sample_size,
            violation_count: r.violation_count,
            violation_rate: r.violation_rate,
            expected_violation_rate: r.expected_violation_rate,
            accuracy: r.accuracy,
        }
    }
}

/// Machine-readable report of a whole run.
#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a BacktestConfig,
    instruments: &'a [Assessment<OptimalResult>],
    summary: Option<&'a RunSummary>,
}

/// Execute the backtest command.
pub fn execute(args: BacktestArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = args.apply(load_config(args.config.as_deref())?);
    config.validate_or_error().map_err(CliError::from)?;

    let series = load_return_series(&args.data)?;
    let outcomes = analyze_instruments(
        &series,
        &config.confidence_levels,
        config.portfolio_value,
        config.parallel_policy(),
    );

    let optimal: Vec<BacktestResult> = outcomes
        .iter()
        .filter_map(Assessment::as_ready)
        .map(|o| o.optimal.clone())
        .collect();
    let skipped: Vec<&InsufficientData> = outcomes
        .iter()
        .filter_map(|o| match o {
            Assessment::Insufficient(info) => Some(info),
            Assessment::Ready(_) => None,
        })
        .collect();
    let summary = RunSummary::from_results(&optimal);

    tracing::info!(
        "Analysed {} of {} instruments",
        optimal.len(),
        outcomes.len()
    );

    match format {
        OutputFormat::Table => {
            print_run_header(&config, &args, series.len())?;
            if !quiet {
                for (i, outcome) in outcomes.iter().enumerate() {
                    print_instrument(i + 1, outcomes.len(), outcome, &config)?;
                }
            }
            for info in &skipped {
                print_warning(&info.to_string());
            }
            match summary {
                Some(ref summary) => print_summary(summary, &config)?,
                None => print_warning("No instrument had enough data to analyse"),
            }
        }
        _ => {
            for info in &skipped {
                tracing::warn!("{info}");
            }
            print_machine_readable(format, &config, &outcomes, &optimal, summary.as_ref())?;
        }
    }

    if args.no_export {
        return Ok(());
    }
    if optimal.is_empty() {
        print_warning("Nothing to export");
        return Ok(());
    }
    write_summary_csv(&config.output_path, &optimal).map_err(CliError::from)?;
    if !quiet && format == OutputFormat::Table {
        print_success(&format!(
            "Exported {} results to {}",
            optimal.len(),
            config.output_path
        ));
    }

    Ok(())
}

fn print_machine_readable(
    format: OutputFormat,
    config: &BacktestConfig,
    outcomes: &[Assessment<OptimalResult>],
    optimal: &[BacktestResult],
    summary: Option<&RunSummary>,
) -> Result<()> {
    match format {
        OutputFormat::Table => {}
        OutputFormat::Json => print_json(&Report {
            config,
            instruments: outcomes,
            summary,
        })?,
        OutputFormat::Csv => {
            let rows: Vec<OptimalRow<'_>> = optimal.iter().map(OptimalRow::from).collect();
            print_csv(&rows)?;
        }
        OutputFormat::Minimal => {
            for r in optimal {
                println!(
                    "{} {} {:.6} {:.4}",
                    r.instrument_id, r.confidence_level, r.var_return, r.accuracy
                );
            }
        }
    }
    Ok(())
}

fn print_run_header(
    config: &BacktestConfig,
    args: &BacktestArgs,
    instruments: usize,
) -> Result<()> {
    print_header("Historical VaR Backtest");
    let levels: Vec<String> = config
        .confidence_levels
        .iter()
        .map(|&c| format_percent(c, 1))
        .collect();
    let rows = vec![
        KeyValue::new("Data", args.data.display().to_string()),
        KeyValue::new("Instruments", instruments.to_string()),
        KeyValue::new(
            "Portfolio Value",
            format_amount(config.portfolio_value, &config.currency),
        ),
        KeyValue::new("Confidence Levels", levels.join(", ")),
    ];
    print_output(&rows, OutputFormat::Table)
}

fn print_instrument(
    position: usize,
    total: usize,
    outcome: &Assessment<OptimalResult>,
    config: &BacktestConfig,
) -> Result<()> {
    let optimal = match outcome {
        Assessment::Ready(optimal) => optimal,
        Assessment::Insufficient(info) => {
            tracing::info!("[{position}/{total}] {}: skipped", info.instrument_id);
            return Ok(());
        }
    };
    tracing::info!("[{position}/{total}] {}", optimal.instrument_id);

    print_header(&format!("[{position}/{total}] {}", optimal.instrument_id));

    let best = &optimal.optimal;
    let stats = &best.return_stats;
    let rows = vec![
        KeyValue::new("Returns", best.sample_size.to_string()),
        KeyValue::from_percent("Min Return", stats.min),
        KeyValue::from_percent("Max Return", stats.max),
        KeyValue::from_percent("Mean Return", stats.mean),
        if stats.has_dispersion() {
            KeyValue::from_percent("Std Return", stats.std)
        } else {
            KeyValue::new("Std Return", "insufficient sample")
        },
        KeyValue::new("", ""),
        KeyValue::new(
            "Optimal Confidence",
            format_percent(best.confidence_level, 1),
        ),
        KeyValue::from_percent("VaR", best.var_return),
        KeyValue::new(
            "VaR Amount",
            format_amount(best.var_amount, &config.currency),
        ),
        KeyValue::new(
            "Violations",
            format!("{}/{}", best.violation_count, best.sample_size),
        ),
        KeyValue::from_percent("Excess Violation Rate", best.excess_violation_rate()),
        KeyValue::new("Accuracy", format!("{:.4}", best.accuracy)),
    ];
    print_output(&rows, OutputFormat::Table)?;

    let levels: Vec<LevelRow> = optimal
        .results
        .iter()
        .enumerate()
        .map(|(i, r)| LevelRow::new(r, optimal.is_optimal(i), &config.currency))
        .collect();
    print_output(&levels, OutputFormat::Table)
}

fn print_summary(summary: &RunSummary, config: &BacktestConfig) -> Result<()> {
    print_divider();
    print_header("Summary");

    let rows = vec![
        KeyValue::new("Instruments Analysed", summary.analyzed.to_string()),
        KeyValue::new(
            "Mean Optimal Confidence",
            format_percent(summary.mean_confidence_level, 2),
        ),
        KeyValue::new(
            "Modal Optimal Confidence",
            format_percent(summary.modal_confidence_level, 1),
        ),
        KeyValue::from_percent("Mean VaR", summary.mean_var_return),
        KeyValue::new("Mean Accuracy", format!("{:.4}", summary.mean_accuracy)),
    ];
    print_output(&rows, OutputFormat::Table)?;

    print_header("Optimal Level Distribution");
    let distribution: Vec<KeyValue> = summary
        .distribution
        .iter()
        .map(|lc| {
            KeyValue::new(
                format_percent(lc.confidence_level, 1),
                format!("{} ({:.1}%)", lc.count, lc.percentage),
            )
        })
        .collect();
    print_output(&distribution, OutputFormat::Table)?;

    let ranking = |title: &str, rankings: &[RiskRanking]| -> Result<()> {
        print_header(title);
        let rows: Vec<KeyValue> = rankings
            .iter()
            .map(|r| {
                KeyValue::new(
                    r.instrument_id.to_string(),
                    format!(
                        "{} at {} ({})",
                        format_percent(r.var_return, 4),
                        format_percent(r.confidence_level, 1),
                        format_amount(r.var_return.abs() * config.portfolio_value, &config.currency)
                    ),
                )
            })
            .collect();
        print_output(&rows, OutputFormat::Table)
    };
    ranking("Highest Risk", &summary.highest_risk)?;
    ranking("Lowest Risk", &summary.lowest_risk)
}
