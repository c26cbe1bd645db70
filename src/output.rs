//! Line-per-prime output.
//!
//! Formats with `itoa` into a large `BufWriter`, so the hot path neither
//! allocates nor goes through `fmt`.

use crate::PrimeSink;
use std::io::{self, BufWriter, Write};

/// Default output buffer (1 MiB).
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Writes each prime as a decimal number followed by `\n`.
pub struct PrimeWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
}

impl<W: Write> PrimeWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
        }
    }

    /// Flush buffered output and return the inner writer.
    pub fn finish(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> PrimeSink for PrimeWriter<W> {
    #[inline]
    fn emit(&mut self, prime: u64) -> io::Result<()> {
        self.writer.write_all(self.itoa_buf.format(prime).as_bytes())?;
        self.writer.write_all(b"\n")
    }
}
