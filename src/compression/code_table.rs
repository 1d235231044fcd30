//! Flattened view of a Huffman tree, indexed both by symbol and by code.
//!
//! A code is stored as an integer whose bit 0 is the first branch taken from
//! the root, which is also the first bit on the wire.

use crate::compression::frequency::ALPHABET_SIZE;
use crate::compression::tree::HuffmanNode;
use crate::error::{Error, Result};
use bitvec::prelude::*;
use log::trace;

/// Longest code the table can hold.
pub const MAX_CODE_LEN: u32 = u64::BITS;

/// One symbol and its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub symbol: u8,
    pub code: u64,
    pub len: u32,
}

impl CodeEntry {
    /// The code as a bit sequence in transmission order.
    pub fn bits(&self) -> BitVec<u64, Lsb0> {
        let mut bits = BitVec::<u64, Lsb0>::from_element(self.code);
        bits.truncate(self.len as usize);
        bits
    }
}

/// Code table derived from a Huffman tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    /// Sorted by length, then by code within a length
    entries: Vec<CodeEntry>,
    by_symbol: [Option<usize>; ALPHABET_SIZE],
}

impl CodeTable {
    /// Derive the code of every leaf in `root`.
    ///
    /// A tree made of a single leaf gets the one-bit code `0`, so every symbol
    /// still costs at least one bit on the wire.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptTree`] if a leaf sits deeper than
    /// [`MAX_CODE_LEN`].
    pub fn from_tree(root: &HuffmanNode) -> Result<Self> {
        let mut entries = Vec::with_capacity(root.leaf_count());
        match root {
            HuffmanNode::Leaf { symbol, .. } => entries.push(CodeEntry {
                symbol: *symbol,
                code: 0,
                len: 1,
            }),
            HuffmanNode::Internal { .. } => collect_codes(root, 0, 0, &mut entries)?,
        }
        entries.sort_by_key(|e| (e.len, e.code));

        let mut by_symbol = [None; ALPHABET_SIZE];
        for (index, entry) in entries.iter().enumerate() {
            by_symbol[entry.symbol as usize] = Some(index);
        }

        trace!(
            "code table: {} entries, lengths {}..={}",
            entries.len(),
            entries.first().map_or(0, |e| e.len),
            entries.last().map_or(0, |e| e.len)
        );
        Ok(CodeTable { entries, by_symbol })
    }

    /// Code and code length for `symbol`, if the tree has a leaf for it.
    pub fn encode_of(&self, symbol: u8) -> Option<(u64, u32)> {
        self.by_symbol[symbol as usize].map(|i| (self.entries[i].code, self.entries[i].len))
    }

    /// Symbol whose code is exactly the `len` low bits of `code`.
    pub fn decode_of(&self, code: u64, len: u32) -> Option<u8> {
        let start = self.entries.partition_point(|e| e.len < len);
        let end = start + self.entries[start..].partition_point(|e| e.len == len);
        let same_len = &self.entries[start..end];
        same_len
            .binary_search_by_key(&code, |e| e.code)
            .ok()
            .map(|i| same_len[i].symbol)
    }

    /// Entries sorted by ascending code length.
    pub fn entries(&self) -> &[CodeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u32 {
        self.entries.last().map_or(0, |e| e.len)
    }

    /// Whether no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let bits: Vec<BitVec<u64, Lsb0>> = self.entries.iter().map(CodeEntry::bits).collect();
        // Sorted by length, so only later entries can extend earlier ones.
        for (i, short) in bits.iter().enumerate() {
            for long in &bits[i + 1..] {
                if long.starts_with(short.as_bitslice()) {
                    return false;
                }
            }
        }
        true
    }
}

fn collect_codes(
    node: &HuffmanNode,
    code: u64,
    len: u32,
    entries: &mut Vec<CodeEntry>,
) -> Result<()> {
    match node {
        HuffmanNode::Leaf { symbol, .. } => {
            entries.push(CodeEntry {
                symbol: *symbol,
                code,
                len,
            });
            Ok(())
        }
        HuffmanNode::Internal { zero, one, .. } => {
            if len >= MAX_CODE_LEN {
                return Err(Error::CorruptTree(format!(
                    "code longer than {} bits",
                    MAX_CODE_LEN
                )));
            }
            collect_codes(zero, code, len + 1, entries)?;
            collect_codes(one, code | (1 << len), len + 1, entries)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compression::frequency::FrequencyTable;
    use crate::compression::tree::build_huffman_tree;

    fn leaf(symbol: u8) -> HuffmanNode {
        HuffmanNode::Leaf { symbol, weight: 0 }
    }

    fn table_for(input: &[u8]) -> CodeTable {
        let tree = build_huffman_tree(&FrequencyTable::from_bytes(input)).unwrap();
        CodeTable::from_tree(&tree).unwrap()
    }

    #[test]
    fn test_first_branch_is_lowest_bit() {
        // root -> zero: 'a', one: (zero: 'b', one: 'c')
        let tree = HuffmanNode::join(leaf(b'a'), HuffmanNode::join(leaf(b'b'), leaf(b'c')));
        let table = CodeTable::from_tree(&tree).unwrap();
        assert_eq!(table.encode_of(b'a'), Some((0b0, 1)));
        assert_eq!(table.encode_of(b'b'), Some((0b01, 2)));
        assert_eq!(table.encode_of(b'c'), Some((0b11, 2)));
        assert_eq!(table.encode_of(b'd'), None);
    }

    #[test]
    fn test_entries_sorted_by_length() {
        let table = table_for(b"AAAABBBCCD");
        let lens: Vec<u32> = table.entries().iter().map(|e| e.len).collect();
        assert!(lens.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(table.len(), 4);
        assert_eq!(table.max_len(), 3);
        assert_eq!(table.encode_of(b'A').map(|(_, len)| len), Some(1));
    }

    #[test]
    fn test_decode_of_inverts_encode_of() {
        let input = b"this is an example for huffman encoding";
        let table = table_for(input);
        for &symbol in input.iter() {
            let (code, len) = table.encode_of(symbol).unwrap();
            assert_eq!(table.decode_of(code, len), Some(symbol));
        }
    }

    #[test]
    fn test_decode_of_needs_exact_length() {
        let table = table_for(b"AAAABBBCCD");
        let (code, len) = table.encode_of(b'D').unwrap();
        for shorter in 1..len {
            let prefix = code & ((1 << shorter) - 1);
            assert_eq!(table.decode_of(prefix, shorter), None);
        }
        assert_eq!(table.decode_of(code, len + 1), None);
    }

    #[test]
    fn test_single_leaf_gets_one_bit_code() {
        let table = CodeTable::from_tree(&leaf(b'Z')).unwrap();
        assert_eq!(table.encode_of(b'Z'), Some((0, 1)));
        assert_eq!(table.decode_of(0, 1), Some(b'Z'));
        assert_eq!(table.decode_of(1, 1), None);
    }

    #[test]
    fn test_prefix_free() {
        let data: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; b as usize % 7 + 1]).collect();
        let table = table_for(&data);
        assert_eq!(table.len(), 256);
        assert!(table.is_prefix_free());
    }

    #[test]
    fn test_prefix_violation_detected() {
        let table = CodeTable {
            entries: vec![
                CodeEntry {
                    symbol: 0,
                    code: 0b1,
                    len: 1,
                },
                CodeEntry {
                    symbol: 1,
                    code: 0b11,
                    len: 2,
                },
            ],
            by_symbol: [None; ALPHABET_SIZE],
        };
        assert!(!table.is_prefix_free());
    }

    #[test]
    fn test_code_bits_in_transmission_order() {
        let entry = CodeEntry {
            symbol: 0,
            code: 0b110,
            len: 3,
        };
        assert_eq!(entry.bits(), bitvec![u64, Lsb0; 0, 1, 1]);
    }
}
