//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BacktestArgs, ConfigArgs, VarArgs};

/// hvar - Historical VaR estimation and backtesting
#[derive(Parser)]
#[command(name = "hvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Backtest every instrument and find its best-calibrated confidence level
    Backtest(BacktestArgs),

    /// Historical VaR of every instrument at one confidence level
    Var(VarArgs),

    /// Show, create, or check run configurations
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one line per instrument)
    Minimal,
}
