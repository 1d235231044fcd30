use crate::compression::bitstream::BitWriter;
use crate::compression::code_table::CodeTable;
use crate::compression::frequency::CHUNK_SIZE;
use crate::error::{Error, Result};
use std::io::{ErrorKind, Read, Write};

/// Writes the code of every byte from `source` to `writer`, in input order.
///
/// Returns the number of bytes encoded.
///
/// # Errors
///
/// Returns [`Error::MissingSymbol`] if a byte has no entry in `table`, which
/// means the table was not built from this input.
pub fn encode<R: Read, W: Write>(
    source: &mut R,
    table: &CodeTable,
    writer: &mut BitWriter<W>,
) -> Result<u64> {
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut encoded = 0u64;
    loop {
        let n = match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for &byte in &chunk[..n] {
            let (code, len) = table.encode_of(byte).ok_or(Error::MissingSymbol(byte))?;
            writer.write_bits(code, len)?;
        }
        encoded += n as u64;
    }
    Ok(encoded)
}
