//! Preorder serialization of a Huffman tree.
//!
//! Each node starts with a flag bit: `1` for a leaf, followed by the 8-bit
//! symbol, or `0` for an internal node, followed by its zero branch and then
//! its one branch. Weights are not transmitted.

use crate::compression::bitstream::{BitReader, BitWriter};
use crate::compression::code_table::MAX_CODE_LEN;
use crate::compression::frequency::ALPHABET_SIZE;
use crate::compression::tree::HuffmanNode;
use crate::error::{Error, Result};
use std::io::{Read, Write};

const LEAF: u64 = 1;
const INTERNAL: u64 = 0;
const SYMBOL_BITS: u32 = 8;

/// Writes `node` and everything beneath it in preorder.
pub fn write_tree<W: Write>(node: &HuffmanNode, writer: &mut BitWriter<W>) -> Result<()> {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            writer.write_bits(LEAF, 1)?;
            writer.write_bits(u64::from(*symbol), SYMBOL_BITS)
        }
        HuffmanNode::Internal { zero, one, .. } => {
            writer.write_bits(INTERNAL, 1)?;
            write_tree(zero, writer)?;
            write_tree(one, writer)
        }
    }
}

/// Number of bits [`write_tree`] emits for `node`.
pub fn serialized_bits(node: &HuffmanNode) -> u64 {
    match node {
        HuffmanNode::Leaf { .. } => 1 + u64::from(SYMBOL_BITS),
        HuffmanNode::Internal { zero, one, .. } => 1 + serialized_bits(zero) + serialized_bits(one),
    }
}

/// Reads a tree written by [`write_tree`].
///
/// # Errors
///
/// - [`Error::Truncated`] if the stream ends inside the tree.
/// - [`Error::CorruptTree`] if the tree is deeper than [`MAX_CODE_LEN`] or
///   names a symbol twice.
pub fn read_tree<R: Read>(reader: &mut BitReader<R>) -> Result<HuffmanNode> {
    let mut seen = [false; ALPHABET_SIZE];
    read_node(reader, 0, &mut seen)
}

fn read_node<R: Read>(
    reader: &mut BitReader<R>,
    depth: u32,
    seen: &mut [bool; ALPHABET_SIZE],
) -> Result<HuffmanNode> {
    if reader.read_exact_bits(1, "tree node flag")? == LEAF {
        let symbol = reader.read_exact_bits(SYMBOL_BITS, "tree leaf symbol")? as u8;
        if std::mem::replace(&mut seen[symbol as usize], true) {
            return Err(Error::CorruptTree(format!(
                "symbol {:#04x} appears more than once",
                symbol
            )));
        }
        return Ok(HuffmanNode::Leaf { symbol, weight: 0 });
    }

    if depth >= MAX_CODE_LEN {
        return Err(Error::CorruptTree(format!(
            "tree is deeper than {} levels",
            MAX_CODE_LEN
        )));
    }
    let zero = read_node(reader, depth + 1, seen)?;
    let one = read_node(reader, depth + 1, seen)?;
    Ok(HuffmanNode::join(zero, one))
}
