//! hvar - Command-line interface for historical VaR backtesting.
//!
//! # Usage
//!
//! ```bash
//! # Calibrate every instrument in a price file
//! hvar backtest --data prices.csv
//!
//! # Narrower grid, larger position, no CSV export
//! hvar backtest --data prices.csv --levels 0.95,0.975,0.99 --portfolio-value 5e8 --no-export
//!
//! # 95% VaR table
//! hvar var --data prices.csv --confidence 0.95
//!
//! # Write a default configuration file
//! hvar config init hvar.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON and CSV on stdout stay clean.
    let default_filter = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Backtest(args) => commands::backtest::execute(args, format, quiet)?,
        Commands::Var(args) => commands::var::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}
