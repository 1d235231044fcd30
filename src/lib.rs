pub mod compression;
pub mod error;

pub use compression::{compress, compress_bytes, decompress, decompress_bytes, CompressionStats};
pub use error::{Error, Result};
