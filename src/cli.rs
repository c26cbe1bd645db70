//! # CLI Execution Functions
//!
//! Turns the parsed [`Cli`] into a [`Mode`] and runs it. Only this module
//! knows about flags; the library sees validated numbers.

use anyhow::{Context, Result};
use primes::config::SieveConfig;
use primes::estimate::{approx_prime_count, MemoryEstimate};
use primes::output::PrimeWriter;
use primes::progress::Progress;
use primes::{PrimeRange, SegmentedSieve, SieveError};
use std::io::{self, ErrorKind};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::Cli;

/// What one invocation does, resolved from the mode flags and positionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Sieve { start: u64, stop: u64 },
    Count { stop: u64 },
    Memory { stop: u64 },
    Limit,
}

impl Mode {
    fn from_cli(cli: &Cli) -> Mode {
        let (start, stop) = match cli.bounds.as_slice() {
            [stop] => (2, *stop),
            [start, stop] => (*start, *stop),
            // clap requires bounds unless --limit is given
            _ => (2, 0),
        };
        if cli.limit {
            Mode::Limit
        } else if cli.count {
            Mode::Count { stop }
        } else if cli.memory {
            Mode::Memory { stop }
        } else {
            Mode::Sieve { start, stop }
        }
    }
}

fn load_config(cli: &Cli) -> Result<SieveConfig> {
    let base = match &cli.config {
        Some(path) => SieveConfig::load(path)?,
        None => SieveConfig::default(),
    };
    Ok(base.with_overrides(cli.sqrt, cli.progress_secs))
}

pub fn run(cli: &Cli) -> Result<()> {
    let mode = Mode::from_cli(cli);
    debug!(?mode, "dispatching");
    match mode {
        Mode::Limit => {
            println!("{}", u64::MAX);
            Ok(())
        }
        Mode::Count { stop } => {
            println!("{}", approx_prime_count(stop));
            Ok(())
        }
        Mode::Memory { stop } => {
            let config = load_config(cli)?;
            println!("{}", MemoryEstimate::for_stop(stop, config.sqrt_mode));
            Ok(())
        }
        Mode::Sieve { start, stop } => {
            let config = load_config(cli)?;
            run_sieve(start, stop, &config)
        }
    }
}

// ── Sieve ───────────────────────────────────────────────────────

/// Stream every prime in `[start, stop]` to stdout.
///
/// A closed stdout (`primes 1 1000000000 | head`) ends the run successfully.
fn run_sieve(start: u64, stop: u64, config: &SieveConfig) -> Result<()> {
    let range = PrimeRange::new(start, stop)?;
    info!(
        start = range.start(),
        stop = range.stop(),
        sqrt_mode = %config.sqrt_mode,
        "sieve starting"
    );

    let sieve = SegmentedSieve::new(range, config.sqrt_mode)
        .context("failed to derive base primes")?;

    let progress = Progress::new();
    let reporter = (config.progress_secs > 0)
        .then(|| progress.start_reporter(Duration::from_secs(config.progress_secs)));

    let started = Instant::now();
    let stdout = io::stdout();
    let mut writer = PrimeWriter::new(stdout.lock());
    let result = sieve
        .run(&mut writer, None, Some(&progress))
        .and_then(|summary| {
            drop(writer.finish()?);
            Ok(summary)
        });

    if let Some(handle) = reporter {
        progress.stop_reporter(handle);
    }

    match result {
        Ok(summary) => {
            info!(
                base_primes = summary.base_primes,
                windows = summary.windows,
                emitted = summary.emitted,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "sieve complete"
            );
            Ok(())
        }
        Err(SieveError::Sink(e)) if e.kind() == ErrorKind::BrokenPipe => {
            debug!("stdout closed, stopping");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
