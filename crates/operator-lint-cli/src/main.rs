//! operator-lint CLI tool.
//!
//! Usage:
//! ```bash
//! operator-lint check [OPTIONS] [PATH]
//! operator-lint list-checks [PATH]
//! operator-lint init [PATH]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use operator_lint_core::Severity;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_locator;

/// Validation checks for operator bundle repositories
#[derive(Parser)]
#[command(name = "operator-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the check suite against a repository
    Check {
        /// Repository root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Suite namespace to run (overrides config)
        #[arg(long)]
        suite: Option<String>,

        /// Exit non-zero at this severity: warning or failure (overrides config)
        #[arg(long)]
        fail_on: Option<Severity>,

        /// Stop at the first outcome at or above the `fail_on` severity
        #[arg(long)]
        fail_fast: bool,
    },

    /// List the checks a suite contributes, per category
    ListChecks {
        /// Repository root whose config applies (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Suite namespace to inspect (overrides config)
        #[arg(long)]
        suite: Option<String>,
    },

    /// Write a starter operator-lint.toml into a repository
    Init {
        /// Repository root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for check results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-outcome compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            suite,
            fail_on,
            fail_fast,
        } => commands::check::run(commands::check::CheckArgs {
            path: &path,
            config: cli.config.as_deref(),
            format,
            suite,
            fail_on,
            fail_fast,
        }),
        Commands::ListChecks { path, suite } => {
            commands::list_checks::run(&path, cli.config.as_deref(), suite)
        }
        Commands::Init { path, force } => commands::init::run(&path, force),
    }
}
