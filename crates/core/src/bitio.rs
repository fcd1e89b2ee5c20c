//! Bit-level I/O for packed Huffman streams.
//!
//! Both directions are MSB-first: the first bit written lands in bit 7 of
//! the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros
//! - BitReader: cannot tell padding from data; the caller bounds decoding
//!   by a known symbol count
//!
//! # Example
//! ```
//! use huftree_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! for bit in [true, false, true, true, true] {
//!     writer.write_bit(bit);
//! }
//! // 10111 -> padded to 10111000
//! let bytes = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(&bytes);
//! assert!(reader.read_bit().unwrap());
//! assert!(!reader.read_bit().unwrap());
//! ```

use crate::code::Code;
use crate::error::{BitIoError, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `filled` is always < 8; a full byte is flushed immediately
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Current partial byte, MSB-aligned
    current: u8,
    /// Bits used in `current` (0-7)
    filled: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose output buffer can hold `bytes` without growing.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current: 0,
            filled: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.current |= 0x80 >> self.filled;
        }
        self.filled += 1;

        if self.filled == 8 {
            self.bytes.push(self.current);
            self.current = 0;
            self.filled = 0;
        }
    }

    /// Append every bit of `code`, first bit first.
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.iter() {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the output bytes.
    ///
    /// A trailing partial byte is emitted with its unused low bits zero.
    /// Output that already ends on a byte boundary gets no extra byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.bytes.push(self.current);
        }
        self.bytes
    }

    /// Total number of bits written so far (excluding padding).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.filled as usize
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next bit to read (0 = MSB of first byte)
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Read one bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` once every bit of the buffer is consumed.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = byte & (0x80 >> (self.position % 8)) != 0;
        self.position += 1;
        Ok(bit)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.position
    }

    /// Index of the next bit to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }
}
