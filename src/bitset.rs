//! # BitSet: Packed Composite Flags
//!
//! Fixed-size bit array over indices `[0, n)`, stored in exactly `ceil(n / 8)`
//! bytes. Bit `i` lives in byte `i / 8` at position `i % 8` (LSB-first).
//!
//! A set bit means the index is **composite** (excluded); an unset bit means it
//! is still a prime candidate. Sieves only ever set bits; the one way back to
//! all-clear is [`BitSet::zero_out`], which lets the segmented sieve recycle a
//! single window buffer instead of reallocating per window.
//!
//! Bounds are a caller contract: `get`/`set` check `pos < n` with
//! `debug_assert!` only. In release builds an index inside the last byte's
//! padding goes unnoticed, and anything past the last byte panics on the
//! slice index.

use crate::error::{Result, SieveError};

/// Number of bytes needed to hold `bits` bits.
#[inline]
pub fn bytes_for(bits: usize) -> usize {
    bits / 8 + usize::from(bits % 8 != 0)
}

pub struct BitSet {
    bytes: Vec<u8>,
    len: usize,
}

impl BitSet {
    /// Create a bitset of `len` bits, all clear.
    ///
    /// Aborts the process if the allocation cannot be satisfied; use
    /// [`BitSet::try_new`] to get an error instead.
    pub fn new(len: usize) -> Self {
        BitSet {
            bytes: vec![0u8; bytes_for(len)],
            len,
        }
    }

    /// Create a bitset of `len` bits, all clear, reporting allocation failure
    /// as [`SieveError::Allocation`].
    pub fn try_new(len: usize) -> Result<Self> {
        let num_bytes = bytes_for(len);
        let mut bytes = Vec::new();
        bytes
            .try_reserve_exact(num_bytes)
            .map_err(|_| SieveError::Allocation {
                bytes: num_bytes as u64,
            })?;
        bytes.resize(num_bytes, 0);
        Ok(BitSet { bytes, len })
    }

    /// Number of bits in this set.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the backing storage in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if bit `pos` is set (composite).
    #[inline]
    pub fn get(&self, pos: usize) -> bool {
        debug_assert!(
            pos < self.len,
            "BitSet index out of bounds: {} >= {}",
            pos,
            self.len
        );
        self.bytes[pos / 8] & (1u8 << (pos % 8)) != 0
    }

    /// Mark bit `pos` as composite. Setting an already-set bit is a no-op.
    #[inline]
    pub fn set(&mut self, pos: usize) {
        debug_assert!(pos < self.len);
        self.bytes[pos / 8] |= 1u8 << (pos % 8);
    }

    /// Clear every bit, keeping the allocation.
    pub fn zero_out(&mut self) {
        self.bytes.fill(0);
    }

    /// Count the clear bits among the `len` valid bits.
    ///
    /// Padding bits in the last byte are never set, so the popcount over whole
    /// bytes is exactly the number of set bits.
    pub fn count_unset(&self) -> usize {
        let set: usize = self.bytes.iter().map(|b| b.count_ones() as usize).sum();
        self.len - set
    }

    /// Iterate over the indices of clear bits below `end`, in ascending order.
    ///
    /// `end` is clamped to `len`.
    pub fn iter_unset_below(&self, end: usize) -> impl Iterator<Item = usize> + '_ {
        let end = end.min(self.len);
        let full = end / 8;
        let tail_bits = end % 8;
        let tail = (tail_bits != 0).then(|| {
            let mask = (1u8 << tail_bits) - 1;
            UnsetIter {
                byte: !self.bytes[full] & mask,
                base: full * 8,
            }
        });
        self.bytes[..full]
            .iter()
            .enumerate()
            .flat_map(|(bi, &byte)| UnsetIter {
                byte: !byte,
                base: bi * 8,
            })
            .chain(tail.into_iter().flatten())
    }
}

/// Iterator over the one-bits of an (inverted) byte.
struct UnsetIter {
    byte: u8,
    base: usize,
}

impl Iterator for UnsetIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.byte == 0 {
            return None;
        }
        let tz = self.byte.trailing_zeros() as usize;
        self.byte &= self.byte - 1;
        Some(self.base + tz)
    }
}
