//! Whole-file Huffman compression.
//!
//! A compressed artifact is a single bit stream made of three fields:
//!
//! 1. the original length in bytes, 32 bits;
//! 2. the code tree, see [`tree_codec`](crate::compression::tree_codec);
//! 3. the code of every input byte, back to back.
//!
//! The last byte is zero-padded. An empty input is stored as the length field
//! alone.

use crate::compression::bitstream::{BitReader, BitWriter};
use crate::compression::code_table::CodeTable;
use crate::compression::decoder::decode;
use crate::compression::encoder::encode;
use crate::compression::frequency::FrequencyTable;
use crate::compression::tree::build_huffman_tree;
use crate::compression::tree_codec::{read_tree, write_tree};
use crate::compression::Compression;
use crate::error::{Error, Result};
use log::debug;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Width of the original-length field.
pub const LENGTH_FIELD_BITS: u32 = 32;

/// Largest input the length field can describe.
pub const MAX_INPUT_LEN: u64 = u32::MAX as u64;

/// Sizes reported by [`compress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_len: u64,
    pub compressed_len: u64,
}

impl CompressionStats {
    /// Compressed size as a percentage of the original size.
    ///
    /// Returns 0.0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 {
            return 0.0;
        }
        100.0 * self.compressed_len as f64 / self.original_len as f64
    }
}

/// Compress everything in `source` into `sink`.
///
/// The source is read twice: once to count byte frequencies and once to
/// encode. Its length is taken from `SeekFrom::End` before either pass.
///
/// # Errors
///
/// - [`Error::InputTooLarge`] if the source is longer than [`MAX_INPUT_LEN`].
/// - [`Error::InvalidInput`] if the source yields a different number of
///   bytes than its reported length.
/// - [`Error::Io`] on any read or write failure.
pub fn compress<R: Read + Seek, W: Write>(source: &mut R, sink: W) -> Result<CompressionStats> {
    let original_len = source.seek(SeekFrom::End(0))?;
    if original_len > MAX_INPUT_LEN {
        return Err(Error::InputTooLarge {
            length: original_len,
            max_length: MAX_INPUT_LEN,
        });
    }

    source.rewind()?;
    let freq_table = FrequencyTable::from_reader(source)?;
    check_len(original_len, freq_table.total())?;

    let mut writer = BitWriter::new(sink);
    writer.write_bits(original_len, LENGTH_FIELD_BITS)?;

    if let Some(tree) = build_huffman_tree(&freq_table) {
        write_tree(&tree, &mut writer)?;
        let tree_bits = writer.bits_written() - u64::from(LENGTH_FIELD_BITS);
        let table = CodeTable::from_tree(&tree)?;
        debug!(
            "compressing {} bytes: {} distinct symbols, tree {} bits, longest code {} bits",
            original_len,
            table.len(),
            tree_bits,
            table.max_len()
        );

        source.rewind()?;
        let encoded = encode(source, &table, &mut writer)?;
        check_len(original_len, encoded)?;
    }

    let stats = CompressionStats {
        original_len,
        compressed_len: writer.bytes_written(),
    };
    writer.finish()?;
    debug!(
        "compressed {} bytes into {} ({:.2} %)",
        stats.original_len,
        stats.compressed_len,
        stats.ratio()
    );
    Ok(stats)
}

fn check_len(expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        return Err(Error::InvalidInput(format!(
            "source reported {} bytes but yielded {}",
            expected, actual
        )));
    }
    Ok(())
}

/// Decompress an artifact produced by [`compress`] into `sink`.
///
/// Returns the number of bytes written. Anything after the last code is
/// ignored.
///
/// # Errors
///
/// - [`Error::Truncated`] if the artifact ends early.
/// - [`Error::CorruptTree`] or [`Error::InvalidCode`] if it is malformed.
/// - [`Error::Io`] on any read or write failure.
pub fn decompress<R: Read, W: Write>(source: R, sink: &mut W) -> Result<u64> {
    let mut reader = BitReader::new(source);
    let original_len = reader.read_exact_bits(LENGTH_FIELD_BITS, "length field")?;
    if original_len == 0 {
        debug!("decompressing empty artifact");
        return Ok(0);
    }

    let tree = read_tree(&mut reader)?;
    let table = CodeTable::from_tree(&tree)?;
    debug!(
        "decompressing {} bytes with {} distinct symbols",
        original_len,
        table.len()
    );
    decode(&mut reader, &table, original_len, sink)?;
    sink.flush()?;
    Ok(original_len)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(&mut Cursor::new(data), &mut out)?;
    Ok(out)
}

/// Decompress an in-memory artifact.
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(data, &mut out)?;
    Ok(out)
}

/// Byte-oriented Huffman codec.
///
/// # Example
///
/// ```
/// use huffpack::compression::{Compression, Huffman};
///
/// let input = b"AAAABBBCCD";
/// let compressed = Huffman.compress(input).unwrap();
/// assert_eq!(Huffman.decompress(&compressed).unwrap(), input);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Compression for Huffman {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        compress_bytes(data)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>> {
        decompress_bytes(data)
    }
}
