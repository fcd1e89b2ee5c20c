//! Compressed file layout.
//!
//! ```text
//! +----------------------+
//! | N (1 byte)           |  number of internal nodes, 0..=255
//! +----------------------+
//! | node records (4 * N) |  postorder, general addressing; root last
//! +----------------------+
//! | size (4 bytes)       |  u32 little-endian original length
//! +----------------------+
//! | payload              |  packed codes, zero-padded to a byte
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! Each node record is `left_type, left_value, right_type, right_value`.
//! Child types are `0` (leaf, value is the symbol) and `1` (internal, value
//! is its postorder number), plus `2` (empty, value `0`). The empty type only
//! appears as the right child of a single-symbol root, whose lone symbol
//! has the code `0`.
//!
//! Empty input is stored as `N = 0`, `size = 0` and no payload.

use crate::error::{FormatError, Result, TreeError};
use crate::serialize::{self, NodeRecord, TreeLayout, MAX_RECORDS, RECORD_SIZE};
use crate::tree::HuffmanTree;

/// Bytes taken by the node count.
const COUNT_SIZE: usize = 1;

/// Bytes taken by the original size field.
const SIZE_FIELD: usize = 4;

/// Everything in a compressed file except the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Node records in postorder; the root is last
    pub records: Vec<NodeRecord>,
    /// Number of symbols in the original input
    pub original_len: u32,
}

impl FileHeader {
    /// Header for `tree` describing `original_len` symbols.
    ///
    /// # Errors
    /// - `FormatError::InputTooLarge` if `original_len` exceeds `u32::MAX`
    /// - `TreeError::TooManyNodes` if the tree cannot be numbered in a byte
    pub fn new(tree: &HuffmanTree, original_len: usize) -> Result<Self> {
        let original_len = u32::try_from(original_len)
            .map_err(|_| FormatError::InputTooLarge { len: original_len })?;
        Ok(Self {
            records: serialize::tree_to_records(tree)?,
            original_len,
        })
    }

    /// Total encoded size of this header in bytes.
    pub fn encoded_len(&self) -> usize {
        COUNT_SIZE + self.records.len() * RECORD_SIZE + SIZE_FIELD
    }

    /// Append the header to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<()> {
        let count = u8::try_from(self.records.len()).map_err(|_| TreeError::TooManyNodes {
            count: self.records.len(),
        })?;

        out.reserve(self.encoded_len());
        out.push(count);
        for record in &self.records {
            out.extend_from_slice(&record.to_bytes());
        }
        out.extend_from_slice(&self.original_len.to_le_bytes());
        Ok(())
    }

    /// Parse a header from the front of `bytes`, returning it together
    /// with the payload that follows.
    ///
    /// # Errors
    /// - `FormatError::HeaderTooShort` if the buffer ends inside the header
    /// - `TreeError::InvalidChildType` for a bad record
    pub fn parse(bytes: &[u8]) -> Result<(Self, &[u8])> {
        let Some((&count, rest)) = bytes.split_first() else {
            return Err(FormatError::HeaderTooShort {
                required: COUNT_SIZE + SIZE_FIELD,
                actual: 0,
            }
            .into());
        };

        let tree_len = count as usize * RECORD_SIZE;
        let required = COUNT_SIZE + tree_len + SIZE_FIELD;
        if bytes.len() < required {
            return Err(FormatError::HeaderTooShort {
                required,
                actual: bytes.len(),
            }
            .into());
        }

        let (tree_bytes, rest) = rest.split_at(tree_len);
        let (size_bytes, payload) = rest.split_at(SIZE_FIELD);

        let records = serialize::bytes_to_records(tree_bytes)?;
        let original_len =
            u32::from_le_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]);

        Ok((
            Self {
                records,
                original_len,
            },
            payload,
        ))
    }

    /// Rebuild the tree from the records, starting at the last one.
    ///
    /// # Errors
    /// `FormatError::SizeWithoutTree` when there are no records but the
    /// header declares symbols, plus any structural error from the chosen
    /// layout.
    pub fn tree(&self, layout: TreeLayout) -> Result<HuffmanTree> {
        match self.records.len() {
            0 if self.original_len == 0 => Ok(HuffmanTree::empty()),
            0 => Err(FormatError::SizeWithoutTree {
                size: self.original_len,
            }
            .into()),
            n if n > MAX_RECORDS => Err(TreeError::TooManyNodes { count: n }.into()),
            n => serialize::records_to_tree(&self.records, n - 1, layout),
        }
    }
}
