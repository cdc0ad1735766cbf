//! Sealchain operator CLI.
//!
//! Encodes values, seals feedback records, replays hash chains and verifies agent
//! chain states offline. JSON goes to stdout, logs to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

mod cmd;
mod config;

use config::{CliConfig, LogFormat, LoggingConfig};

#[derive(Debug, Parser)]
#[command(name = "sealchain")]
#[command(version, about = "Seal and verify agent reputation hash chains", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode a decimal value into a scaled integer.
    Encode(cmd::value::EncodeArgs),
    /// Decode a scaled integer into a decimal string.
    Decode(cmd::value::DecodeArgs),
    /// Compute the seal preimage and hash of a feedback record.
    Seal(cmd::seal::SealArgs),
    /// Replay one chain and check its stored checkpoints.
    Replay(cmd::chain::ReplayArgs),
    /// Verify an agent's three chain states against its events.
    Verify(cmd::chain::VerifyArgs),
    /// Print deterministic seal v1 vectors as JSON.
    Vectors,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(cli.debug, &config.logging)?;

    debug!(version = env!("CARGO_PKG_VERSION"), ?config, "sealchain starting");

    let pretty = config.output.pretty;
    match cli.command {
        Command::Encode(args) => cmd::value::run_encode(args, pretty)?,
        Command::Decode(args) => cmd::value::run_decode(args)?,
        Command::Seal(args) => cmd::seal::run(args, pretty)?,
        Command::Replay(args) => cmd::chain::run_replay(args, pretty)?,
        Command::Verify(args) => cmd::chain::run_verify(args, pretty)?,
        Command::Vectors => {
            let vectors = sealchain_verifier::generate_vectors_v1()?;
            cmd::print_json(&vectors, pretty)?;
        }
    }

    Ok(())
}

/// Crates that emit logs; the core crate is pure and has none.
const LOG_TARGETS: &[&str] = &["sealchain", "sealchain_verifier"];

/// `EnvFilter` directives enabling `level` for every logging crate.
fn filter_directives(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing subscriber for logging
fn init_logging(debug: bool, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = if debug {
        EnvFilter::new(filter_directives("debug"))
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(filter_directives(&logging.level))
                .context("Invalid logging level")?,
        }
    };

    let (pretty, json) = match logging.format {
        LogFormat::Pretty => (
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            ),
            None,
        ),
        LogFormat::Json => (None, Some(fmt::layer().json().with_writer(std::io::stderr))),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(pretty)
        .with(json)
        .init();

    Ok(())
}
