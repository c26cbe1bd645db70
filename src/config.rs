//! Run configuration: TOML file, environment, and command-line overrides.
//!
//! A config file is optional. Every field has a default, so an empty file (or
//! none at all) yields [`SieveConfig::default`]. Command-line flags and their
//! `PRIMES_*` environment variables are applied on top by the binary.
//!
//! ```toml
//! # primes.toml
//! sqrt_mode = "exact"    # or "float"
//! progress_secs = 30     # 0 disables the progress reporter
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the window width `floor(sqrt(stop))` is computed.
///
/// - **Exact**: float estimate corrected with integer checks; always the true
///   integer square root.
/// - **Float**: the bare `(stop as f64).sqrt() as u64`. Matches older runs
///   bit for bit, but for `stop` near `2^64` the conversion to `f64` can push
///   the estimate one above or below the true root. One below would leave the
///   square of the largest base prime unmarked.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SqrtMode {
    #[default]
    Exact,
    Float,
}

impl std::fmt::Display for SqrtMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqrtMode::Exact => write!(f, "exact"),
            SqrtMode::Float => write!(f, "float"),
        }
    }
}

/// Settings for one sieve run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SieveConfig {
    pub sqrt_mode: SqrtMode,
    /// Seconds between progress log lines; 0 disables the reporter.
    pub progress_secs: u64,
}

impl SieveConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid sieve config")
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply command-line / environment overrides. `None` keeps the file value.
    pub fn with_overrides(mut self, sqrt_mode: Option<SqrtMode>, progress_secs: Option<u64>) -> Self {
        if let Some(mode) = sqrt_mode {
            self.sqrt_mode = mode;
        }
        if let Some(secs) = progress_secs {
            self.progress_secs = secs;
        }
        self
    }
}
