//! Whole-buffer compression and decompression.
//!
//! Compression: count frequencies, build the tree, derive codes, write the
//! header (node records + original size), then append the packed payload.
//! Decompression reverses this, bounding the tree walk by the declared size.

use tracing::debug;

use crate::code::CodeTable;
use crate::error::Result;
use crate::format::FileHeader;
use crate::frequency::FrequencyMap;
use crate::pack;
use crate::serialize::TreeLayout;
use crate::tree::HuffmanTree;

/// Result of a compression, with the statistics reported alongside it.
#[derive(Debug, Clone)]
pub struct Compressed {
    /// Complete compressed file
    pub bytes: Vec<u8>,
    /// Header size (count byte, node records and size field)
    pub header_len: usize,
    /// Internal nodes written to the header
    pub internal_nodes: usize,
    /// Distinct symbols in the input
    pub distinct_symbols: usize,
    /// Frequency-weighted average code length
    pub bits_per_symbol: f64,
}

impl Compressed {
    pub fn payload_len(&self) -> usize {
        self.bytes.len() - self.header_len
    }
}

/// Compress `data` into the huftree file format.
///
/// ```
/// let packed = huftree_core::codec::compress(b"abracadabra").unwrap();
/// let restored = huftree_core::codec::decompress(&packed).unwrap();
/// assert_eq!(restored, b"abracadabra");
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_detailed(data).map(|compressed| compressed.bytes)
}

/// Compress `data` and report header/tree statistics.
pub fn compress_detailed(data: &[u8]) -> Result<Compressed> {
    let freq = FrequencyMap::from_bytes(data);
    let tree = HuffmanTree::from_frequencies(&freq);
    let codes = CodeTable::from_tree(&tree);
    let header = FileHeader::new(&tree, data.len())?;
    let bits_per_symbol = tree.avg_length(&freq);

    let mut bytes = Vec::new();
    header.write_to(&mut bytes)?;
    let header_len = bytes.len();
    bytes.extend(pack::pack(data, &codes)?);

    debug!(
        input_len = data.len(),
        output_len = bytes.len(),
        symbols = freq.len(),
        internal_nodes = header.records.len(),
        bits_per_symbol,
        "compressed buffer"
    );

    Ok(Compressed {
        bytes,
        header_len,
        internal_nodes: header.records.len(),
        distinct_symbols: freq.len(),
        bits_per_symbol,
    })
}

/// Decompress a buffer produced by [`compress`], rebuilding the tree with
/// general addressing.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    decompress_with(bytes, TreeLayout::General)
}

/// Decompress using the given tree reconstruction scheme.
///
/// Both layouts accept any file written by [`compress`], since records are
/// always stored in postorder.
///
/// # Errors
/// Malformed headers, corrupt node records, and payloads that end before
/// the declared number of symbols all fail the whole call.
pub fn decompress_with(bytes: &[u8], layout: TreeLayout) -> Result<Vec<u8>> {
    let (header, payload) = FileHeader::parse(bytes)?;
    let tree = header.tree(layout)?;
    let output = pack::unpack(payload, &tree, header.original_len as usize)?;

    debug!(
        input_len = bytes.len(),
        output_len = output.len(),
        internal_nodes = header.records.len(),
        ?layout,
        "decompressed buffer"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BitIoError, Error, FormatError, TreeError};

    #[test]
    fn test_round_trip_text() {
        let input = b"hello world! this is a test of huffman coding.";
        let packed = compress(input).unwrap();

        assert_eq!(decompress(&packed).unwrap(), input);
        assert_eq!(
            decompress_with(&packed, TreeLayout::Postorder).unwrap(),
            input
        );
    }

    #[test]
    fn test_empty_input() {
        let packed = compress(b"").unwrap();
        assert_eq!(packed, vec![0, 0, 0, 0, 0]);
        assert!(decompress(&packed).unwrap().is_empty());
    }

    #[test]
    fn test_single_symbol_run() {
        let input = vec![b'X'; 1000];
        let compressed = compress_detailed(&input).unwrap();

        // 1 bit per symbol
        assert_eq!(compressed.payload_len(), 125);
        assert_eq!(compressed.internal_nodes, 1);
        assert_eq!(compressed.bits_per_symbol, 1.0);
        assert_eq!(decompress(&compressed.bytes).unwrap(), input);
    }

    #[test]
    fn test_known_layout() {
        // b: 1, a: 2 -> tree (b, a); codes b=0, a=1; payload 1 0 1 -> 101
        let packed = compress(b"aba").unwrap();
        assert_eq!(packed, vec![1, 0, b'b', 0, b'a', 3, 0, 0, 0, 0b1010_0000]);
    }

    #[test]
    fn test_statistics() {
        let input = b"aaaabbc";
        let compressed = compress_detailed(input).unwrap();

        assert_eq!(compressed.distinct_symbols, 3);
        assert_eq!(compressed.internal_nodes, 2);
        assert_eq!(compressed.header_len, 1 + 2 * 4 + 4);
        // a=1 bit, b and c = 2 bits: (4 + 4 + 2) / 7
        assert!((compressed.bits_per_symbol - 10.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_truncated_payload() {
        let mut packed = compress(b"the quick brown fox").unwrap();
        packed.truncate(packed.len() - 2);

        assert!(matches!(
            decompress(&packed),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }

    #[test]
    fn test_truncated_header() {
        let packed = compress(b"the quick brown fox").unwrap();
        assert!(matches!(
            decompress(&packed[..6]),
            Err(Error::Format(FormatError::HeaderTooShort { .. }))
        ));
    }

    #[test]
    fn test_corrupt_reference() {
        let mut packed = compress(b"abcabcabd").unwrap();
        // root record is last; point its left child at a missing node
        let count = packed[0] as usize;
        let root = 1 + (count - 1) * 4;
        packed[root] = 1;
        packed[root + 1] = 200;

        assert!(matches!(
            decompress(&packed),
            Err(Error::Tree(TreeError::IndexOutOfRange { index: 200, .. }))
        ));
    }

    #[test]
    fn test_size_beyond_payload() {
        // one record (two leaves), declared size u32::MAX, no payload
        let forged = [1, 0, 0, 0, 1, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            decompress(&forged),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
        assert!(matches!(
            decompress_with(&forged, TreeLayout::Postorder),
            Err(Error::BitIo(BitIoError::UnexpectedEof))
        ));
    }
}
