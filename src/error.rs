//! Error type shared by the sieve engine.

use std::io;
use thiserror::Error;

/// Errors that can occur while setting up or running a sieve.
#[derive(Error, Debug)]
pub enum SieveError {
    /// `start` was greater than `stop`. Rejected before any sieving happens.
    #[error("invalid range: start {start} is greater than stop {stop}")]
    InvalidRange { start: u64, stop: u64 },

    /// Storage for a bitset or prime array could not be obtained.
    #[error("cannot allocate {bytes} bytes of sieve storage")]
    Allocation { bytes: u64 },

    /// The prime sink refused a value (typically a failed write).
    #[error("prime sink failed: {0}")]
    Sink(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SieveError>;
