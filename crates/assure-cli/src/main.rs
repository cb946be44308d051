//! # assure CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use assure_cli::frameworks::{run_frameworks, FrameworksArgs};
use assure_cli::score::{run_score, ScoreArgs};
use assure_cli::validate::{run_validate, ValidateArgs};

/// Assure Stack CLI
///
/// Offline tooling for the compliance catalog: inspect frameworks,
/// validate answer files, and compute compliance scores without a
/// running API.
#[derive(Parser, Debug)]
#[command(name = "assure", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the framework catalog, or show one framework in detail.
    Frameworks(FrameworksArgs),

    /// Check an answers file against a framework.
    Validate(ValidateArgs),

    /// Compute the compliance score for an answers file.
    Score(ScoreArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Frameworks(args) => run_frameworks(&args),
        Commands::Validate(args) => run_validate(&args),
        Commands::Score(args) => run_score(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
