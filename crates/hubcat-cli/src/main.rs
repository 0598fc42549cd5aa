//! # hubcat CLI entry point
//!
//! Parses command-line arguments, initialises tracing and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hubcat_cli::items::{run_items, ItemsArgs};
use hubcat_cli::owners::{run_owners, OwnersArgs};
use hubcat_cli::report::{OutputFormat, ReportOptions};
use hubcat_cli::EXIT_FAULT;

/// hubcat: catalog contract checker.
///
/// Validates catalog documents (collections of model, dataset, space, paper
/// and collection items) against the base + variant item contract and the
/// owner-descriptor contract.
#[derive(Parser, Debug)]
#[command(name = "hubcat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// At -v, text reports also show per-item highlights.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate every item against the base and variant schemas.
    Items(ItemsArgs),

    /// Audit collection owners and item authorData descriptors.
    Owners(OwnersArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let opts = ReportOptions {
        format: cli.format,
        details: cli.verbose > 0,
    };
    let mut stdout = std::io::stdout().lock();

    let result = match cli.command {
        Commands::Items(args) => run_items(&args, &cwd, opts, &mut stdout),
        Commands::Owners(args) => run_owners(&args, &cwd, opts, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAULT)
        }
    }
}
