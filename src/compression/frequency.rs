use crate::error::Result;
use std::io::{ErrorKind, Read};

/// Number of distinct symbols: every possible byte value.
pub const ALPHABET_SIZE: usize = 256;

/// Size of the chunks pulled from a byte source during a full pass.
pub const CHUNK_SIZE: usize = 4096;

/// Occurrence counts for each of the 256 byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::default();
        table.add(data);
        table
    }

    /// Count every byte a reader yields until end of data.
    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self> {
        let mut table = Self::default();
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => table.add(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(table)
    }

    fn add(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Occurrences of `symbol`; zero if it never appeared.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of byte values with a non-zero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// `(symbol, count)` for every byte value that occurred, in symbol order.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
