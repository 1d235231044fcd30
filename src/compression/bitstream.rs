//! Bit-level I/O over byte sources and sinks.
//!
//! Bits are packed least-significant-bit first: the first bit written lands in
//! bit 0 of the first output byte, the ninth in bit 0 of the second byte, and
//! so on. The layout does not depend on the host's byte order.
//!
//! Both directions buffer through a 64-bit accumulator, so the wrapped reader
//! or writer sees whole 8-byte chunks except for the final partial word.

use crate::error::{Error, Result};
use std::io::{ErrorKind, Read, Write};

/// Width of the bit accumulator, and the largest count accepted per call.
pub const WORD_BITS: u32 = u64::BITS;

const WORD_BYTES: usize = (WORD_BITS / 8) as usize;

#[inline]
fn low_mask(count: u32) -> u64 {
    if count >= WORD_BITS {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

fn check_count(count: u32) -> Result<()> {
    if count > WORD_BITS {
        return Err(Error::InvalidInput(format!(
            "bit count {} exceeds the {}-bit word",
            count, WORD_BITS
        )));
    }
    Ok(())
}

/// Writes individual bits to a byte sink.
///
/// Call [`BitWriter::finish`] to flush the trailing partial byte; dropping the
/// writer discards any bits still buffered.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    /// Pending bits, oldest in bit 0
    buf: u64,
    /// Number of valid bits in `buf`
    filled: u32,
    bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Wraps a byte sink.
    pub fn new(inner: W) -> Self {
        BitWriter {
            inner,
            buf: 0,
            filled: 0,
            bits_written: 0,
        }
    }

    /// Appends the `count` least-significant bits of `value`, lowest bit first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `count` exceeds [`WORD_BITS`] and
    /// [`Error::Io`] if flushing a full word to the sink fails.
    pub fn write_bits(&mut self, value: u64, count: u32) -> Result<()> {
        check_count(count)?;

        let mut written = 0;
        while written < count {
            let take = (count - written).min(WORD_BITS - self.filled);
            let chunk = (value >> written) & low_mask(take);
            self.buf |= chunk << self.filled;
            self.filled += take;
            written += take;
            if self.filled == WORD_BITS {
                self.flush_word()?;
            }
        }
        self.bits_written += u64::from(count);
        Ok(())
    }

    /// Appends a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(u64::from(bit), 1)
    }

    /// Total number of bits accepted so far.
    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    /// Number of bytes the sink will hold once the writer is finished.
    pub fn bytes_written(&self) -> u64 {
        self.bits_written.div_ceil(8)
    }

    fn flush_word(&mut self) -> Result<()> {
        self.inner.write_all(&self.buf.to_le_bytes())?;
        self.buf = 0;
        self.filled = 0;
        Ok(())
    }

    /// Flushes buffered bits, zero-padding the last byte, and returns the sink.
    pub fn finish(mut self) -> Result<W> {
        if self.filled > 0 {
            let len = self.filled.div_ceil(8) as usize;
            self.inner.write_all(&self.buf.to_le_bytes()[..len])?;
            self.buf = 0;
            self.filled = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Reads individual bits from a byte source, in the order [`BitWriter`] wrote them.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    inner: R,
    /// Unconsumed bits, next one in bit 0
    buf: u64,
    /// Number of valid bits in `buf`
    available: u32,
    exhausted: bool,
    bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Wraps a byte source.
    pub fn new(inner: R) -> Self {
        BitReader {
            inner,
            buf: 0,
            available: 0,
            exhausted: false,
            bits_read: 0,
        }
    }

    /// Reads up to `count` bits and returns `(value, bits_actually_read)`.
    ///
    /// Fewer than `count` bits are returned only when the source runs dry;
    /// the missing high bits of `value` are zero.
    pub fn read_bits(&mut self, count: u32) -> Result<(u64, u32)> {
        check_count(count)?;

        let mut value = 0u64;
        let mut read = 0;
        while read < count {
            if self.available == 0 && !self.refill()? {
                break;
            }
            let take = (count - read).min(self.available);
            value |= (self.buf & low_mask(take)) << read;
            self.buf = self.buf.checked_shr(take).unwrap_or(0);
            self.available -= take;
            read += take;
        }
        self.bits_read += u64::from(read);
        Ok((value, read))
    }

    /// Reads exactly `count` bits or fails with [`Error::Truncated`].
    ///
    /// `context` names the field being read and ends up in the error message.
    pub fn read_exact_bits(&mut self, count: u32, context: &'static str) -> Result<u64> {
        let (value, read) = self.read_bits(count)?;
        if read < count {
            return Err(Error::Truncated { context });
        }
        Ok(value)
    }

    /// Reads one bit, or `None` at end of data.
    pub fn read_bit(&mut self) -> Result<Option<bool>> {
        match self.read_bits(1)? {
            (bit, 1) => Ok(Some(bit == 1)),
            _ => Ok(None),
        }
    }

    /// Total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }

    /// Loads the next word from the source. Returns `false` at end of data.
    fn refill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }

        let mut bytes = [0u8; WORD_BYTES];
        let mut len = 0;
        while len < WORD_BYTES {
            match self.inner.read(&mut bytes[len..]) {
                Ok(0) => {
                    self.exhausted = true;
                    break;
                }
                Ok(n) => len += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        if len == 0 {
            return Ok(false);
        }

        self.buf = u64::from_le_bytes(bytes);
        self.available = (len * 8) as u32;
        Ok(true)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
