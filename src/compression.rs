//! Byte-oriented Huffman compression.
//!
//! The pipeline is split into small components, leaves first:
//! - [`bitstream`]: bit-level reader and writer over `std::io` byte streams
//! - [`frequency`]: byte occurrence counts
//! - [`tree`]: greedy Huffman tree construction
//! - [`tree_codec`]: preorder (de)serialization of the tree
//! - [`code_table`]: per-symbol codes, searchable by symbol or by code
//! - [`encoder`] and [`decoder`]: the bit-packing loops
//! - [`huffman`]: the whole-file `compress` / `decompress` pipeline
//!
//! # Examples
//!
//! ```rust
//! use huffpack::compression::{compress_bytes, decompress_bytes};
//!
//! let compressed = compress_bytes(b"abracadabra").unwrap();
//! assert_eq!(decompress_bytes(&compressed).unwrap(), b"abracadabra");
//! ```

use crate::error::Result;

/// Trait for compression algorithms
pub trait Compression {
    /// Compress the input data
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Decompress the compressed data
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

pub mod bitstream;
pub mod code_table;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod huffman;
pub mod tree;
pub mod tree_codec;


pub use bitstream::{BitReader, BitWriter};
pub use code_table::{CodeEntry, CodeTable};
pub use frequency::FrequencyTable;
pub use huffman::{
    compress, compress_bytes, decompress, decompress_bytes, CompressionStats, Huffman,
};
pub use tree::{build_huffman_tree, HuffmanNode};
