use thiserror::Error;

/// Errors raised while compressing or decompressing.
///
/// Every variant is fatal for the operation that produced it; nothing in the
/// pipeline retries.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The compressed stream ended before a required field was complete.
    #[error("unexpected end of compressed stream while reading {context}")]
    Truncated { context: &'static str },

    /// The serialized tree is not a valid prefix-code tree.
    #[error("corrupt code tree: {0}")]
    CorruptTree(String),

    /// No code in the table matches the accumulated bits.
    #[error("no code matches {bits} accumulated bits")]
    InvalidCode { bits: u32 },

    /// The encoder met a byte its own code table does not cover.
    #[error("symbol {0:#04x} has no code table entry")]
    MissingSymbol(u8),

    #[error("input of {length} bytes exceeds the maximum of {max_length}")]
    InputTooLarge { length: u64, max_length: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
