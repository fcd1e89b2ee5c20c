//! huftree-core: Huffman compression with a compact node-record tree header
//!
//! This library provides:
//! - Frequency counting and greedy Huffman tree construction
//! - Code table derivation with a prefix-freedom check
//! - Tree serialization to 4-byte postorder node records, decodable with
//!   either absolute ("general") or postorder-relative addressing
//! - Bit packing/unpacking with zero padding bounded by a symbol count
//! - Level-order symbol reassignment within a fixed tree shape
//! - A whole-buffer `compress`/`decompress` pair over the file format
//!
//! # Architecture
//!
//! Data flows through the modules in this order:
//! - `frequency`: byte counts
//! - `tree`: prefix tree built from the counts
//! - `code`: per-symbol bit strings
//! - `serialize`: node records for the header
//! - `bitio` / `pack`: the payload bitstream
//! - `format`: header layout
//! - `codec`: orchestration
//! - `optimize`: optional symbol reassignment
//! - `metrics`: run statistics
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: a fixed tie-break rule makes output reproducible
//! - **Bounded recursion**: traversals are iterative; decoders cap depth

pub mod bitio;
pub mod code;
pub mod codec;
pub mod error;
pub mod format;
pub mod frequency;
pub mod metrics;
pub mod optimize;
pub mod pack;
pub mod serialize;
pub mod tree;

// Re-export commonly used types
pub use codec::{compress, decompress, decompress_with};
pub use error::{Error, Result};
pub use serialize::TreeLayout;
