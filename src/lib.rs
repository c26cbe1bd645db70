pub mod bitset;
pub mod config;
pub mod error;
pub mod estimate;
pub mod output;
pub mod progress;
pub mod segmented;
pub mod sieve;

pub use error::{Result, SieveError};
pub use segmented::{primes_in_range, PrimeRange, SegmentedSieve, SieveSummary};

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation hook polled by the segmented sieve between windows.
/// A run that sees `true` stops before sweeping the next window.
pub trait StopSignal {
    fn is_stop_requested(&self) -> bool;
}

impl StopSignal for AtomicBool {
    fn is_stop_requested(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Receiver for primes as the sieve confirms them, in ascending order.
///
/// An error aborts the run; values already emitted stay emitted.
pub trait PrimeSink {
    fn emit(&mut self, prime: u64) -> io::Result<()>;
}

impl PrimeSink for Vec<u64> {
    fn emit(&mut self, prime: u64) -> io::Result<()> {
        self.push(prime);
        Ok(())
    }
}

/// Counts primes without storing them.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub count: u64,
    pub last: Option<u64>,
}

impl PrimeSink for CountingSink {
    fn emit(&mut self, prime: u64) -> io::Result<()> {
        self.count += 1;
        self.last = Some(prime);
        Ok(())
    }
}
