//! condist CLI - Conditional Distribution Scenarios
//!
//! Command-line entry point evaluating the law of some coordinates of a
//! multivariate distribution given fixed values of the others.
//!
//! # Commands
//!
//! - `condist evaluate --scenario <file>` - Print pdf and cdf at each query point
//! - `condist check <file>` - Validate a scenario and print its derived range,
//!   free dimension and normalisation factor
//!
//! # Configuration
//!
//! Scenario file, then `CONDIST_LOG_LEVEL` / `CONDIST_SAMPLE_SIZE` /
//! `CONDIST_SEED`, then command-line flags. `RUST_LOG` takes precedence over
//! every log level setting.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the base families of
//! `condist_models` into the `condist_engine` conditioning facade.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::{build_config, CliArgs, LogLevel};
pub use error::{CliError, Result};

/// Conditional distribution CLI
#[derive(Parser)]
#[command(name = "condist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the conditional pdf and cdf at the scenario's query points
    Evaluate {
        /// Path to scenario file (TOML)
        #[arg(short, long)]
        scenario: PathBuf,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Monte Carlo draws per CDF query (switches to sampling)
        #[arg(short = 'n', long)]
        sample_size: Option<usize>,

        /// Seed for the sampling strategy
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a scenario and print its derived quantities
    Check {
        /// Path to scenario file (TOML)
        scenario: PathBuf,
    },
}

fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load(cli: &CliArgs) -> Result<config::ScenarioConfig> {
    if !Path::new(&cli.scenario).exists() {
        return Err(CliError::FileNotFound(cli.scenario.clone()));
    }
    let config = build_config(cli)?;
    init_tracing(config.log_level);
    info!("Loaded scenario {}", cli.scenario.display());
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            scenario,
            format,
            sample_size,
            seed,
        } => {
            let config = load(&CliArgs {
                scenario,
                log_level: cli.log_level,
                sample_size,
                seed,
            })?;
            commands::evaluate::run(&config, &format)
        }
        Commands::Check { scenario } => {
            let config = load(&CliArgs {
                scenario,
                log_level: cli.log_level,
                ..Default::default()
            })?;
            commands::check::run(&config)
        }
    }
}
