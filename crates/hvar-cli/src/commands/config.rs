//! Config command implementation.
//!
//! Shows the default run configuration, writes it to a file, or checks an
//! existing file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use hvar_config::{BacktestConfig, Validate};

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::error::CliError;
use crate::output::{
    format_amount, format_percent, print_header, print_info, print_json, print_output,
    print_success, print_warning, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show a configuration (the defaults unless a file is given)
    Show(ShowArgs),

    /// Write the default configuration to a TOML file
    Init(InitArgs),

    /// Check a configuration file
    Validate(ValidateArgs),
}

/// Arguments for show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Configuration file to show
    pub path: Option<PathBuf>,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// File to create
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check
    pub path: PathBuf,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => execute_show(show_args, format),
        ConfigCommand::Init(init_args) => execute_init(init_args),
        ConfigCommand::Validate(validate_args) => execute_validate(validate_args, format),
    }
}

fn config_rows(config: &BacktestConfig) -> Vec<KeyValue> {
    let levels: Vec<String> = config
        .confidence_levels
        .iter()
        .map(|&c| format_percent(c, 1))
        .collect();
    vec![
        KeyValue::new(
            "portfolio_value",
            format_amount(config.portfolio_value, &config.currency),
        ),
        KeyValue::new("currency", config.currency.clone()),
        KeyValue::new("confidence_levels", levels.join(", ")),
        KeyValue::new(
            "single_confidence_level",
            format_percent(config.single_confidence_level, 1),
        ),
        KeyValue::new("parallel", config.parallel.to_string()),
        KeyValue::new("parallel_threshold", config.parallel_threshold.to_string()),
        KeyValue::new("output_path", config.output_path.clone()),
    ]
}

/// Show a configuration.
fn execute_show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(args.path.as_deref())?;

    match format {
        OutputFormat::Table => {
            print_header("Backtest Configuration");
            print_output(&config_rows(&config), format)?;
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Csv => print_output(&config_rows(&config), format)?,
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::AlreadyExists(args.path.display().to_string()).into());
    }

    BacktestConfig::default()
        .write_to_file(&args.path)
        .map_err(CliError::from)?;

    print_success(&format!("Wrote default configuration to {}", args.path.display()));
    print_info("Pass it to `hvar backtest --config` after editing");
    Ok(())
}

/// Check a configuration file.
fn execute_validate(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let config = BacktestConfig::from_file(&args.path).map_err(CliError::from)?;
    let errors = config.validate();

    match format {
        OutputFormat::Json => {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            print_json(&serde_json::json!({
                "path": args.path.display().to_string(),
                "valid": errors.is_empty(),
                "errors": messages,
            }))?;
        }
        _ => {
            for error in &errors {
                print_warning(&error.to_string());
            }
        }
    }

    config.validate_or_error().map_err(CliError::from)?;
    if format != OutputFormat::Json {
        print_success(&format!("{} is valid", args.path.display()));
    }
    Ok(())
}
