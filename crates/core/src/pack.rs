//! Packing symbol codes into bytes and walking them back out.
//!
//! Packing concatenates the code of every input byte and pads the last byte
//! with zero bits. Unpacking walks the tree one bit at a time and stops as
//! soon as the requested number of symbols has been produced, so padding
//! bits are never interpreted.

use crate::bitio::{BitReader, BitWriter};
use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::tree::{HuffmanTree, Node};

/// Encode `data` with `codes`, MSB-first, zero-padded to a byte boundary.
///
/// # Errors
/// `HuffmanError::UnknownSymbol` if a byte of `data` has no code.
///
/// ```
/// use huftree_core::code::{Code, CodeTable};
/// use huftree_core::pack::pack;
///
/// let codes: CodeTable = [(0u8, "0"), (1, "10"), (2, "11")]
///     .into_iter()
///     .map(|(symbol, bits)| (symbol, bits.parse::<Code>().unwrap()))
///     .collect();
/// assert_eq!(pack(&[1, 2, 1, 0], &codes).unwrap(), vec![0b1011_1000]);
/// ```
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(data.len() / 2);
    for &symbol in data {
        let code = codes
            .get(symbol)
            .ok_or(HuffmanError::UnknownSymbol { symbol })?;
        writer.write_code(code);
    }
    Ok(writer.finish())
}

/// Decode exactly `count` symbols from `packed` using `tree`.
///
/// Trailing bits after the last symbol are ignored.
///
/// # Errors
/// - `HuffmanError::EmptyTree` if `count > 0` and the tree has no root
/// - `HuffmanError::InvalidCode` if a bit leads to an absent child
/// - `BitIoError::UnexpectedEof` if the bits run out before `count`
///   symbols are produced
pub fn unpack(packed: &[u8], tree: &HuffmanTree, count: usize) -> Result<Vec<u8>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let root = tree
        .root()
        .ok_or(HuffmanError::EmptyTree { expected: count })?;

    let mut reader = BitReader::new(packed);
    // `count` may come from an untrusted header; each symbol costs at least one bit
    let mut output = Vec::with_capacity(count.min(reader.bits_remaining()));
    let mut node = root;

    while output.len() < count {
        match node {
            Node::Leaf { symbol } => {
                output.push(*symbol);
                node = root;
            }
            Node::Internal { left, right } => {
                let position = reader.position();
                let next = if reader.read_bit()? { right } else { left };
                node = next
                    .as_deref()
                    .ok_or(HuffmanError::InvalidCode { position })?;
            }
        }
    }

    Ok(output)
}
