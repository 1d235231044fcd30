use crate::compression::bitstream::BitReader;
use crate::compression::code_table::CodeTable;
use crate::compression::frequency::CHUNK_SIZE;
use crate::error::{Error, Result};
use std::io::{Read, Write};

/// Decodes exactly `count` symbols from `reader` into `sink`.
///
/// Bits are taken one at a time and appended to a candidate code until the
/// table recognizes it; the matching symbol is emitted and the candidate is
/// reset. Output is handed to the sink in chunks.
///
/// # Errors
///
/// - [`Error::Truncated`] if the stream ends before `count` symbols.
/// - [`Error::InvalidCode`] if the candidate grows past the longest code.
pub fn decode<R: Read, W: Write>(
    reader: &mut BitReader<R>,
    table: &CodeTable,
    count: u64,
    sink: &mut W,
) -> Result<()> {
    let max_len = table.max_len();
    let mut out = Vec::with_capacity(CHUNK_SIZE);
    let mut emitted = 0u64;

    while emitted < count {
        let mut code = 0u64;
        let mut len = 0u32;
        let symbol = loop {
            if len == max_len {
                return Err(Error::InvalidCode { bits: len + 1 });
            }
            let bit = reader
                .read_bit()?
                .ok_or(Error::Truncated { context: "coded data" })?;
            code |= u64::from(bit) << len;
            len += 1;
            if let Some(symbol) = table.decode_of(code, len) {
                break symbol;
            }
        };

        out.push(symbol);
        emitted += 1;
        if out.len() == CHUNK_SIZE {
            sink.write_all(&out)?;
            out.clear();
        }
    }

    if !out.is_empty() {
        sink.write_all(&out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::bitstream::BitWriter;
    use crate::compression::encoder::encode;
    use crate::compression::frequency::FrequencyTable;
    use crate::compression::tree::{build_huffman_tree, HuffmanNode};
    use std::io::Cursor;

    fn encoded(input: &[u8]) -> (CodeTable, Vec<u8>) {
        let tree = build_huffman_tree(&FrequencyTable::from_bytes(input)).unwrap();
        let table = CodeTable::from_tree(&tree).unwrap();
        let mut writer = BitWriter::new(Vec::new());
        encode(&mut &input[..], &table, &mut writer).unwrap();
        (table, writer.finish().unwrap())
    }

    #[test]
    fn test_decode_round_trip() {
        let input = b"huffman coding in rust is fun!";
        let (table, bytes) = encoded(input);
        let mut out = Vec::new();
        decode(
            &mut BitReader::new(Cursor::new(bytes)),
            &table,
            input.len() as u64,
            &mut out,
        )
        .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_padding_is_not_decoded() {
        // 19 code bits, so the last byte ends in 5 padding bits.
        let input = b"AAAABBBCCD";
        let (table, bytes) = encoded(input);
        let mut out = Vec::new();
        decode(&mut BitReader::new(Cursor::new(bytes)), &table, 10, &mut out).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_output_spans_several_chunks() {
        let input: Vec<u8> = (0..3 * CHUNK_SIZE + 5).map(|i| (i % 13) as u8).collect();
        let (table, bytes) = encoded(&input);
        let mut out = Vec::new();
        decode(
            &mut BitReader::new(Cursor::new(bytes)),
            &table,
            input.len() as u64,
            &mut out,
        )
        .unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_truncated_stream() {
        let input = b"abcdefgh";
        let (table, mut bytes) = encoded(input);
        bytes.truncate(1);
        let err = decode(
            &mut BitReader::new(Cursor::new(bytes)),
            &table,
            input.len() as u64,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }));
    }

    #[test]
    fn test_unmatched_bits_rejected() {
        // Only code `0` exists; a `1` bit can never match.
        let table = CodeTable::from_tree(&HuffmanNode::Leaf {
            symbol: b'Z',
            weight: 0,
        })
        .unwrap();
        let err = decode(
            &mut BitReader::new(Cursor::new(vec![0b0000_0100u8])),
            &table,
            5,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidCode { bits: 2 }));
    }

    #[test]
    fn test_zero_count_reads_nothing() {
        let (table, _) = encoded(b"xyz");
        let mut reader = BitReader::new(Cursor::new(Vec::<u8>::new()));
        let mut out = Vec::new();
        decode(&mut reader, &table, 0, &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(reader.bits_read(), 0);
    }
}
