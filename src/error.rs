//! Crate-wide error type.
//!
//! Every fallible core operation returns `Result<_, Error>`. Boxed dynamic errors
//! (`Box<dyn std::error::Error>`) are reserved for the CLI binary's `main`, which is
//! free to wrap any of these plus ordinary I/O errors.

/// All error conditions the core can surface.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("not a PNG file")]
    NotPng,
    #[error("CRC-32 mismatch on chunk {chunk_type:?}: expected {expected:#010x}, got {actual:#010x}")]
    BadCrc {
        chunk_type: [u8; 4],
        expected: u32,
        actual: u32,
    },
    #[error("Adler-32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    BadAdler { expected: u32, actual: u32 },
    #[error("bad zlib header")]
    BadZlibHeader,
    #[error("zlib preset dictionaries are not supported")]
    PresetDictUnsupported,
    #[error("reserved DEFLATE block type (BTYPE=11)")]
    ReservedBtype,
    #[error("corrupt STORED block: NLEN does not complement LEN")]
    CorruptStored,
    #[error("invalid Huffman code: walked off the tree")]
    InvalidCode,
    #[error("reserved literal/length code (286 or 287)")]
    ReservedCode,
    #[error("back-reference distance {distance} out of range (must be 1..={max})")]
    BadDistance { distance: usize, max: usize },
    #[error("Huffman code lengths oversubscribe the Kraft-McMillan inequality")]
    KraftOversubscribed,
    #[error("unsupported PNG filter id {0}")]
    BadFilter(u8),
    #[error("truncated input: needed {needed} more bits/bytes at offset {at}")]
    Truncated { needed: usize, at: usize },
    #[error("LUT grid shape invalid: {0}")]
    GridShape(String),
    #[error("LUT grid domain invalid: {0}")]
    GridDomain(String),
    #[error("file format mismatch: {0}")]
    FileFormatMismatch(String),
    #[error("kernel not applicable to this grid shape")]
    NotApplicable,
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
