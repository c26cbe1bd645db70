//! # Sieve: Classic Sieve of Eratosthenes and Square-Root Bounds
//!
//! Generates every prime in `[0, limit]` with a single [`BitSet`] of
//! `limit + 1` bits. The segmented sieve only ever calls this with
//! `limit = floor(sqrt(stop))`, so even for `stop = 2^64 - 1` the bitset is
//! 512 MiB at most and usually far smaller.
//!
//! ## Algorithm
//!
//! 1. Mark 0 and 1 (neither is prime).
//! 2. For each unmarked `p` up to `isqrt(limit)`, mark `p², p² + p, …`.
//!    Smaller multiples of `p` have a prime factor below `p` and are already
//!    marked.
//! 3. Count clear bits, reserve exactly that many slots, then collect the clear
//!    indices in ascending order. The output vector never reallocates.
//!
//! Complexity: O(n log log n) time, n / 8 bytes of space.
//!
//! ## Square roots near 2^64
//!
//! `(n as f64).sqrt() as u64` is the usual way to get the window width, but
//! an `f64` cannot represent every `u64`, so near `2^64` the estimate can be
//! off by one (`u64::MAX` rounds up to `2^64`, whose root is
//! `2^32`). [`isqrt`] corrects the float estimate with checked multiplication;
//! [`window_width`] picks between the two according to [`SqrtMode`].

use crate::bitset::BitSet;
use crate::config::SqrtMode;
use crate::error::{Result, SieveError};

/// Floor of the square root of `n`, exact for every `u64`.
pub fn isqrt(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Width `W` of each segmented-sieve window for a range ending at `stop`.
///
/// The base primes are exactly the primes `<= W`.
pub fn window_width(stop: u64, mode: SqrtMode) -> u64 {
    match mode {
        SqrtMode::Exact => isqrt(stop),
        SqrtMode::Float => (stop as f64).sqrt() as u64,
    }
}

/// Generate all primes in `[0, limit]`, in ascending order.
///
/// Returns [`SieveError::Allocation`] if `limit + 1` bits are not addressable
/// on this platform or the storage cannot be obtained.
pub fn primes_up_to(limit: u64) -> Result<Vec<u64>> {
    let bits = usize::try_from(limit)
        .ok()
        .and_then(|l| l.checked_add(1))
        .ok_or(SieveError::Allocation {
            bytes: limit / 8 + 1,
        })?;
    let limit = bits - 1;

    let mut composite = BitSet::try_new(bits)?;
    composite.set(0);
    if limit >= 1 {
        composite.set(1);
    }

    let max = isqrt(limit as u64) as usize;
    for p in 2..=max {
        if !composite.get(p) {
            for multiple in (p * p..=limit).step_by(p) {
                composite.set(multiple);
            }
        }
    }

    let count = composite.count_unset();
    let mut primes = Vec::new();
    primes
        .try_reserve_exact(count)
        .map_err(|_| SieveError::Allocation {
            bytes: (count as u64).saturating_mul(8),
        })?;
    primes.extend(composite.iter_unset_below(bits).map(|i| i as u64));
    debug_assert_eq!(primes.len(), count);
    Ok(primes)
}
