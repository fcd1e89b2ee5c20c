//! Integration tests for the full huftree pipeline.
//!
//! These tests exercise end-to-end behavior: bytes -> frequencies -> tree ->
//! header + payload -> tree (both layouts) -> bytes, plus property tests for
//! the invariants each stage promises.

use huftree_core::{
    code::CodeTable,
    codec::{compress, compress_detailed, decompress, decompress_with},
    frequency::FrequencyMap,
    optimize::improve_tree,
    pack::{pack, unpack},
    serialize::{records_to_tree, tree_to_records},
    tree::{HuffmanTree, Node},
    TreeLayout,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Balanced prefix tree over `symbols`, used as a competitor for Huffman.
fn balanced_tree(symbols: &[u8]) -> Node {
    match symbols {
        [only] => Node::leaf(*only),
        _ => {
            let (left, right) = symbols.split_at(symbols.len() / 2);
            Node::internal(balanced_tree(left), balanced_tree(right))
        }
    }
}

/// Byte sequences with a small, skewed alphabet so trees get some depth.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => 0u8..16,
            1 => any::<u8>(),
        ],
        1..2000,
    )
}

/// Round trip through both reconstruction layouts.
#[test]
fn test_full_pipeline_text() {
    let input = b"The quick brown fox jumps over the lazy dog. ".repeat(50);

    let compressed = compress_detailed(&input).expect("compression failed");
    assert!(compressed.bytes.len() < input.len());

    for layout in [TreeLayout::General, TreeLayout::Postorder] {
        let decoded = decompress_with(&compressed.bytes, layout).expect("decompression failed");
        assert_eq!(decoded, input, "output doesn't match input for {layout:?}");
    }
}

/// Every byte value present once: 256 leaves, 255 records.
#[test]
fn test_all_symbols() {
    let input: Vec<u8> = (0..=255).collect();

    let compressed = compress_detailed(&input).unwrap();
    assert_eq!(compressed.internal_nodes, 255);
    assert_eq!(compressed.bytes[0], 255);
    // uniform weights give a complete tree: 8 bits each
    assert_eq!(compressed.payload_len(), 256);

    assert_eq!(decompress(&compressed.bytes).unwrap(), input);
}

/// Random data from a seeded generator, several sizes.
#[test]
fn test_random_inputs() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for size in [1, 2, 7, 8, 9, 255, 4096, 65536] {
        let input: Vec<u8> = (0..size).map(|_| rng.gen()).collect();
        let packed = compress(&input).unwrap();

        assert_eq!(decompress(&packed).unwrap(), input, "size {size}");
        assert_eq!(
            decompress_with(&packed, TreeLayout::Postorder).unwrap(),
            input,
            "size {size}"
        );
    }
}

/// Power-of-two decaying frequencies produce the deepest possible tree.
#[test]
fn test_skewed_frequencies() {
    let mut input = Vec::new();
    for symbol in 0u8..20 {
        input.extend(std::iter::repeat(symbol).take(1 << (19 - symbol)));
    }

    let packed = compress(&input).unwrap();
    assert_eq!(decompress(&packed).unwrap(), input);
}

#[test]
fn test_single_symbol_edge_case() {
    let freq: FrequencyMap = [(42, 100)].into_iter().collect();
    let tree = HuffmanTree::from_frequencies(&freq);
    let codes = CodeTable::from_tree(&tree);

    assert!(codes.get(42).unwrap().len() >= 1);

    let input = vec![42u8; 100];
    assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
}

#[test]
fn test_optimizer_after_statistics_shift() {
    let original = b"aaaaaaaabbbbccd";
    let mut tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(original));

    // same alphabet, reversed popularity
    let shifted = b"ddddddddccccbba";
    let freq = FrequencyMap::from_bytes(shifted);
    let before = tree.weighted_length(&freq);

    improve_tree(&mut tree, &freq).unwrap();
    assert!(tree.weighted_length(&freq) < before);

    let codes = CodeTable::from_tree(&tree);
    let packed = pack(shifted, &codes).unwrap();
    assert_eq!(unpack(&packed, &tree, shifted.len()).unwrap(), shifted);
}

#[test]
fn test_corrupt_tag_rejected() {
    let mut packed = compress(b"mississippi").unwrap();
    packed[1] = 9;
    assert!(decompress(&packed).is_err());
}

proptest! {
    #[test]
    fn prop_round_trip(input in prop::collection::vec(any::<u8>(), 0..4096)) {
        let packed = compress(&input).unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), input.clone());
        prop_assert_eq!(decompress_with(&packed, TreeLayout::Postorder).unwrap(), input);
    }

    #[test]
    fn prop_codes_prefix_free(input in skewed_bytes()) {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input));
        let codes = CodeTable::from_tree(&tree);

        prop_assert!(codes.is_prefix_free());
        prop_assert!(codes.iter().all(|(_, code)| !code.is_empty()));
    }

    #[test]
    fn prop_no_worse_than_balanced(input in skewed_bytes()) {
        let freq = FrequencyMap::from_bytes(&input);
        let huffman = HuffmanTree::from_frequencies(&freq);

        let symbols: Vec<u8> = freq.iter().map(|(symbol, _)| symbol).collect();
        prop_assume!(symbols.len() >= 2);
        let balanced = HuffmanTree::new(balanced_tree(&symbols));

        prop_assert!(huffman.weighted_length(&freq) <= balanced.weighted_length(&freq));
    }

    #[test]
    fn prop_serialization_round_trip(input in skewed_bytes()) {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input));
        let records = tree_to_records(&tree).unwrap();
        let root = records.len() - 1;

        for layout in [TreeLayout::General, TreeLayout::Postorder] {
            let rebuilt = records_to_tree(&records, root, layout).unwrap();
            prop_assert_eq!(CodeTable::from_tree(&rebuilt), CodeTable::from_tree(&tree));
            prop_assert_eq!(&rebuilt, &tree);
        }
    }

    #[test]
    fn prop_root_numbered_last(input in skewed_bytes()) {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input));
        let numbered = tree.postorder_internal();

        prop_assert_eq!(numbered.len(), tree.internal_count());
        prop_assert!(std::ptr::eq(numbered[numbered.len() - 1], tree.root().unwrap()));
    }

    #[test]
    fn prop_padding_ignored(input in skewed_bytes()) {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input));
        let codes = CodeTable::from_tree(&tree);
        let packed = pack(&input, &codes).unwrap();

        let bits: usize = input.iter().map(|&b| codes.get(b).unwrap().len()).sum();
        prop_assert_eq!(packed.len(), bits.div_ceil(8));
        prop_assert_eq!(unpack(&packed, &tree, input.len()).unwrap(), input);
    }

    #[test]
    fn prop_optimizer_never_regresses(
        input in skewed_bytes(),
        reweight in prop::collection::vec(1u64..1000, 256),
    ) {
        let mut tree = HuffmanTree::from_frequencies(&FrequencyMap::from_bytes(&input));
        let freq: FrequencyMap = tree
            .symbols()
            .into_iter()
            .map(|symbol| (symbol, reweight[symbol as usize]))
            .collect();
        let before = tree.avg_length(&freq);
        let shape_before = tree.internal_count();

        improve_tree(&mut tree, &freq).unwrap();

        prop_assert!(tree.avg_length(&freq) <= before + 1e-12);
        prop_assert_eq!(tree.internal_count(), shape_before);
    }
}
