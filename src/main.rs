//! # Main: CLI Entry Point
//!
//! `primes [OPTIONS] [START] <STOP>` prints every prime in `[START, STOP]`,
//! one per line, ascending. `START` defaults to 2 and anything below 2 is
//! raised to 2.
//!
//! ## Modes
//!
//! - no mode flag: run the segmented sieve and stream primes to stdout.
//! - `--count`: print `STOP / ln STOP` without sieving.
//! - `--memory`: print the estimated auxiliary memory for sieving to `STOP`.
//! - `--limit`: print the largest supported `STOP` (`u64::MAX`).
//!
//! ## Global Options
//!
//! - `--config` / `PRIMES_CONFIG`: TOML run configuration.
//! - `--sqrt` / `PRIMES_SQRT`: `exact` (default) or `float` square root for
//!   the window width.
//! - `--progress-secs` / `PRIMES_PROGRESS_SECS`: log progress to stderr every
//!   N seconds (0 = off).
//!
//! Logs go to stderr (`LOG_FORMAT=json` for JSON, `RUST_LOG` to filter);
//! stdout carries only results.

mod cli;

use anyhow::Result;
use clap::Parser;
use primes::config::SqrtMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "primes",
    version,
    about = "Generate prime numbers in a range up to the u64 maximum",
    after_help = "If [START] is not given, or is less than 2, 2 is used."
)]
struct Cli {
    /// Print the approximate number of primes from 2 up to STOP
    #[arg(long, conflicts_with_all = ["memory", "limit"])]
    count: bool,

    /// Show approximately how much memory sieving up to STOP needs
    #[arg(long, conflicts_with = "limit")]
    memory: bool,

    /// Print the largest supported STOP and exit
    #[arg(long)]
    limit: bool,

    /// Path to a TOML config file (sqrt_mode, progress_secs)
    #[arg(long, env = "PRIMES_CONFIG")]
    config: Option<PathBuf>,

    /// Square-root policy for the window width
    #[arg(long, env = "PRIMES_SQRT", value_enum)]
    sqrt: Option<SqrtMode>,

    /// Seconds between progress log lines on stderr (0 disables)
    #[arg(long, env = "PRIMES_PROGRESS_SECS")]
    progress_secs: Option<u64>,

    /// [START] STOP
    #[arg(
        value_name = "BOUND",
        num_args = 1..=2,
        required_unless_present = "limit"
    )]
    bounds: Vec<u64>,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for machine-readable logs, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
