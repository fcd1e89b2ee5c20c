//! Error types for huftree.
//!
//! Every compress/decompress call either succeeds completely or reports a
//! structured error; there is no partial output and no panic path in the
//! library.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading bits past the end of a packed stream
/// - Huffman: code table, packing and tree-walk failures
/// - Tree: structural problems in serialized node records
/// - Format: compressed file header problems
/// - I/O: file system operations (binary front end only)
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Huffman codec error (e.g., unknown symbol, dead-end walk)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Serialized tree is structurally invalid
    #[error("tree structure error: {0}")]
    Tree(#[from] TreeError),

    /// Compressed file header is malformed
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// Input contains a byte the code table has no entry for
    #[error("symbol {symbol} has no code in the table")]
    UnknownSymbol { symbol: u8 },

    /// Tree walk reached an absent child before a leaf
    #[error("invalid huffman code at bit position {position}")]
    InvalidCode { position: usize },

    /// Symbols were requested from a tree with no nodes
    #[error("cannot decode {expected} symbols with an empty tree")]
    EmptyTree { expected: usize },

    /// Frequency map names a symbol the tree does not contain
    #[error("symbol {symbol} is not a leaf of the tree")]
    AlphabetMismatch { symbol: u8 },

    /// Code string contains something other than '0' and '1'
    #[error("malformed code string {0:?}")]
    MalformedCode(String),
}

/// Errors raised while rebuilding a tree from node records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Child type tag is not leaf (0), internal (1) or empty (2)
    #[error("record {record} has invalid child type tag {tag}")]
    InvalidChildType { record: usize, tag: u8 },

    /// Internal child reference points outside the record list
    #[error("record {record} references node {index}, but only {len} records exist")]
    IndexOutOfRange {
        record: usize,
        index: usize,
        len: usize,
    },

    /// A record was reached twice (cycle or shared subtree)
    #[error("record {index} is referenced more than once")]
    NodeReused { index: usize },

    /// More internal nodes than a one-byte count can express
    #[error("{count} internal nodes exceed the maximum of 255")]
    TooManyNodes { count: usize },

    /// Root index does not name a record
    #[error("root index {root} out of range for {len} records")]
    RootOutOfRange { root: usize, len: usize },
}

/// Compressed file header errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer is shorter than the header it declares
    #[error("header too short: need at least {required} bytes, got {actual}")]
    HeaderTooShort { required: usize, actual: usize },

    /// Input length does not fit the 4-byte size field
    #[error("input of {len} bytes exceeds the 4-byte size field")]
    InputTooLarge { len: usize },

    /// Header declares symbols but carries no tree
    #[error("header declares {size} symbols but no tree")]
    SizeWithoutTree { size: u32 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
