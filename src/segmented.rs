//! # Segmented Sieve: Primes in `[start, stop]` with O(sqrt(stop)) Memory
//!
//! Enumerates every prime in a 64-bit range without ever holding a bitset
//! proportional to the range. Only two buffers live for the whole run:
//!
//! - the **base primes**, all primes `<= W` where `W = floor(sqrt(stop))`,
//!   produced once by [`sieve::primes_up_to`] and read-only afterwards;
//! - one **window bitset** of `W + 1` bits, zeroed and reused for every window.
//!
//! Any composite `n <= stop` has a prime factor `<= sqrt(n) <= W`, so
//! crossing off multiples of the base primes alone identifies every composite
//! in the range.
//!
//! ## Sweep
//!
//! 1. Emit each base prime `>= start`.
//! 2. `low = max(start, W + 1)`. Each window covers `[low, last]` with
//!    `last = min(low + W - 1, stop)`; the final window may be narrower.
//! 3. Per window: for every base prime `p`, round `low` up to a multiple of
//!    `p` and mark that multiple and every `p`-th offset after it. Since
//!    `low > W >= p`, each marked value is at least `2p` and therefore
//!    composite. Emit `low + i` for every offset `i` left clear, then zero the
//!    bitset.
//! 4. Stop once `last == stop`. All bound arithmetic is checked, so
//!    `stop = u64::MAX` terminates.
//!
//! Windows only share the read-only base primes, which makes the gap between
//! windows the natural place to poll a [`StopSignal`].

use crate::bitset::BitSet;
use crate::config::SqrtMode;
use crate::error::{Result, SieveError};
use crate::progress::Progress;
use crate::sieve;
use crate::{PrimeSink, StopSignal};
use std::sync::atomic::Ordering;
use tracing::{debug, trace};

/// A validated inclusive range of candidates.
///
/// `start` is clamped up to 2. A range with `stop < 2` is valid and contains
/// no primes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeRange {
    start: u64,
    stop: u64,
}

impl PrimeRange {
    /// Rejects `start > stop` (compared before clamping).
    pub fn new(start: u64, stop: u64) -> Result<Self> {
        if start > stop {
            return Err(SieveError::InvalidRange { start, stop });
        }
        Ok(PrimeRange {
            start: start.max(2),
            stop,
        })
    }

    /// Range `[2, stop]`.
    pub fn up_to(stop: u64) -> Self {
        PrimeRange { start: 2, stop }
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn stop(&self) -> u64 {
        self.stop
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }
}

/// What one run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SieveSummary {
    pub base_primes: usize,
    pub windows: u64,
    pub emitted: u64,
    /// The run ended early because a [`StopSignal`] fired.
    pub cancelled: bool,
}

/// One segmented-sieve query with all of its storage already acquired.
pub struct SegmentedSieve {
    range: PrimeRange,
    width: u64,
    base_primes: Box<[u64]>,
    window: BitSet,
}

impl SegmentedSieve {
    /// Compute the window width for `range`, sieve the base primes, and
    /// allocate the window bitset. Nothing is allocated after this returns.
    pub fn new(range: PrimeRange, mode: SqrtMode) -> Result<Self> {
        let width = sieve::window_width(range.stop, mode);
        let base_primes = sieve::primes_up_to(width)?.into_boxed_slice();
        let window = window_bitset(width)?;
        debug!(
            start = range.start,
            stop = range.stop,
            width,
            base_primes = base_primes.len(),
            sqrt_mode = %mode,
            "base primes ready"
        );
        Ok(SegmentedSieve {
            range,
            width,
            base_primes,
            window,
        })
    }

    pub fn range(&self) -> PrimeRange {
        self.range
    }

    /// Window width `W`; also the largest candidate base prime.
    pub fn width(&self) -> u64 {
        self.width
    }

    pub fn base_primes(&self) -> &[u64] {
        &self.base_primes
    }

    /// Sweep the range, handing every prime to `sink` in ascending order.
    ///
    /// `stop_signal` is polled before each window. `progress`, when given, is
    /// updated after each window.
    pub fn run<S: PrimeSink + ?Sized>(
        mut self,
        sink: &mut S,
        stop_signal: Option<&dyn StopSignal>,
        progress: Option<&Progress>,
    ) -> Result<SieveSummary> {
        let PrimeRange { start, stop } = self.range;
        let mut summary = SieveSummary {
            base_primes: self.base_primes.len(),
            ..SieveSummary::default()
        };

        for &p in self.base_primes.iter().filter(|&&p| p >= start) {
            sink.emit(p)?;
            summary.emitted += 1;
        }
        if let Some(progress) = progress {
            progress.found.fetch_add(summary.emitted, Ordering::Relaxed);
        }

        let width = self.width.max(1);
        let window = &mut self.window;
        let mut low = start.max(width + 1);
        while low <= stop {
            if stop_signal.is_some_and(|s| s.is_stop_requested()) {
                debug!(low, "stop requested, ending sweep");
                summary.cancelled = true;
                break;
            }

            let last = low.saturating_add(width - 1).min(stop);
            let span = last - low;
            mark_window(window, &self.base_primes, low, span);

            let mut found = 0u64;
            for offset in window.iter_unset_below(span as usize + 1) {
                sink.emit(low + offset as u64)?;
                found += 1;
            }
            window.zero_out();

            summary.windows += 1;
            summary.emitted += found;
            if let Some(progress) = progress {
                progress.record_window(low, found);
            }
            trace!(low, last, found, "window swept");

            if last == stop {
                break;
            }
            low = last + 1;
        }

        debug!(
            windows = summary.windows,
            emitted = summary.emitted,
            cancelled = summary.cancelled,
            "segmented sieve finished"
        );
        Ok(summary)
    }
}

/// Window bitset of `W + 1` bits (at least 2).
fn window_bitset(width: u64) -> Result<BitSet> {
    let width = width.max(1);
    let bits = usize::try_from(width + 1).map_err(|_| SieveError::Allocation {
        bytes: width / 8 + 1,
    })?;
    BitSet::try_new(bits)
}

/// Mark every multiple of each base prime in `[low, low + span]`.
///
/// Offsets never exceed `span + p <= 2W`, so they cannot overflow.
fn mark_window(window: &mut BitSet, base_primes: &[u64], low: u64, span: u64) {
    for &p in base_primes {
        let rem = low % p;
        let mut offset = if rem == 0 { 0 } else { p - rem };
        while offset <= span {
            window.set(offset as usize);
            offset += p;
        }
    }
}

/// Collect every prime in `[start, stop]` into a vector.
///
/// Buffers the whole result; prefer [`SegmentedSieve::run`] with a streaming
/// sink for large ranges.
pub fn primes_in_range(start: u64, stop: u64) -> Result<Vec<u64>> {
    let range = PrimeRange::new(start, stop)?;
    let mut primes = Vec::new();
    SegmentedSieve::new(range, SqrtMode::Exact)?.run(&mut primes, None, None)?;
    Ok(primes)
}
