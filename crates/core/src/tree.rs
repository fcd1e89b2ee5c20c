//! Huffman tree construction and traversal.
//!
//! Nodes own their children exclusively (`Box`), so a tree is a plain value
//! that can be compared, cloned and moved between pipeline stages.
//!
//! # Tie-breaking
//!
//! Construction repeatedly merges the two entries with the smallest
//! `(weight, order)` key. Leaves use their symbol value as `order`; the n-th
//! merged node uses `256 + n`. The first entry extracted becomes the left
//! child. Equal-weight leaves are therefore taken before equal-weight
//! subtrees, and older subtrees before newer ones, which makes the output
//! (and so the serialized bytes) reproducible.
//!
//! All traversals use explicit stacks: a tree over 256 symbols can be up to
//! 255 levels deep.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::code::CodeTable;
use crate::frequency::FrequencyMap;

/// A node of a Huffman tree.
///
/// Internal nodes normally have both children. The only exception produced
/// by [`HuffmanTree::from_frequencies`] is the root of a single-symbol tree,
/// which has a left leaf and no right child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
    },
    Internal {
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn leaf(symbol: u8) -> Self {
        Node::Leaf { symbol }
    }

    /// Internal node with both children present.
    pub fn internal(left: Node, right: Node) -> Self {
        Node::Internal {
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn symbol(&self) -> Option<u8> {
        match self {
            Node::Leaf { symbol } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Internal { left, .. } => left.as_deref(),
            Node::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Internal { right, .. } => right.as_deref(),
            Node::Leaf { .. } => None,
        }
    }

    /// Visit this subtree in postorder: left, right, then the node itself.
    pub fn postorder(&self) -> Postorder<'_> {
        Postorder {
            stack: vec![(self, false)],
        }
    }

    /// Number of internal nodes in this subtree, including `self`.
    pub fn internal_count(&self) -> usize {
        self.postorder().filter(|node| !node.is_leaf()).count()
    }
}

/// Postorder iterator over a subtree, driven by an explicit stack.
#[derive(Debug, Clone)]
pub struct Postorder<'a> {
    /// `(node, children_pushed)`
    stack: Vec<(&'a Node, bool)>,
}

impl<'a> Iterator for Postorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        while let Some((node, expanded)) = self.stack.pop() {
            match node {
                Node::Internal { left, right } if !expanded => {
                    self.stack.push((node, true));
                    if let Some(right) = right.as_deref() {
                        self.stack.push((right, false));
                    }
                    if let Some(left) = left.as_deref() {
                        self.stack.push((left, false));
                    }
                }
                _ => return Some(node),
            }
        }
        None
    }
}

/// A Huffman tree; empty when built from an empty frequency map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<Node>,
}

/// Priority queue entry used during construction.
struct HeapEntry {
    weight: u64,
    order: u32,
    node: Node,
}

impl HeapEntry {
    fn key(&self) -> (u64, u32) {
        (self.weight, self.order)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl HuffmanTree {
    pub fn new(root: Node) -> Self {
        Self { root: Some(root) }
    }

    pub fn empty() -> Self {
        Self { root: None }
    }

    /// Build an optimal prefix tree for `freq`.
    ///
    /// Uses a min-priority queue keyed by `(weight, order)`, see the module
    /// docs for the tie-break rule. A single symbol is wrapped in an internal
    /// root (as its left child) so that its code has length 1.
    ///
    /// ```
    /// use huftree_core::frequency::FrequencyMap;
    /// use huftree_core::tree::{HuffmanTree, Node};
    ///
    /// let freq: FrequencyMap = [(2, 6), (3, 4)].into_iter().collect();
    /// let tree = HuffmanTree::from_frequencies(&freq);
    /// assert_eq!(tree, HuffmanTree::new(Node::internal(Node::leaf(3), Node::leaf(2))));
    /// ```
    pub fn from_frequencies(freq: &FrequencyMap) -> Self {
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = freq
            .iter()
            .map(|(symbol, weight)| {
                Reverse(HeapEntry {
                    weight,
                    order: symbol as u32,
                    node: Node::leaf(symbol),
                })
            })
            .collect();

        if heap.len() <= 1 {
            let root = heap.pop().map(|Reverse(entry)| Node::Internal {
                left: Some(Box::new(entry.node)),
                right: None,
            });
            return Self { root };
        }

        let mut next_order = 256;
        while heap.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(Reverse(HeapEntry {
                weight: left.weight.saturating_add(right.weight),
                order: next_order,
                node: Node::internal(left.node, right.node),
            }));
            next_order += 1;
        }

        debug!(
            symbols = freq.len(),
            merges = next_order - 256,
            "built huffman tree"
        );

        Self {
            root: heap.pop().map(|Reverse(entry)| entry.node),
        }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub(crate) fn root_mut(&mut self) -> Option<&mut Node> {
        self.root.as_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every node in postorder; empty for an empty tree.
    pub fn postorder(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root.iter().flat_map(Node::postorder)
    }

    /// Internal nodes in postorder.
    ///
    /// The position of a node in this list is its serialization number, so
    /// the root (when internal) is always last.
    pub fn postorder_internal(&self) -> Vec<&Node> {
        self.postorder().filter(|node| !node.is_leaf()).collect()
    }

    pub fn internal_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::internal_count)
    }

    /// Leaf symbols in postorder.
    pub fn symbols(&self) -> Vec<u8> {
        self.postorder().filter_map(Node::symbol).collect()
    }

    /// Sum over the tree's symbols of `code length * frequency`.
    ///
    /// Symbols missing from `freq` contribute nothing.
    pub fn weighted_length(&self, freq: &FrequencyMap) -> u64 {
        CodeTable::from_tree(self)
            .iter()
            .map(|(symbol, code)| code.len() as u64 * freq.get(symbol).unwrap_or(0))
            .sum()
    }

    /// Average bits per symbol for text with frequencies `freq`.
    ///
    /// Only symbols present in the tree are counted. Returns 0.0 when none
    /// of them has a frequency.
    pub fn avg_length(&self, freq: &FrequencyMap) -> f64 {
        let total: u64 = self
            .symbols()
            .into_iter()
            .filter_map(|symbol| freq.get(symbol))
            .sum();
        if total == 0 {
            return 0.0;
        }
        self.weighted_length(freq) as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn freq(pairs: &[(u8, u64)]) -> FrequencyMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_two_symbols() {
        let tree = HuffmanTree::from_frequencies(&freq(&[(2, 6), (3, 4)]));
        assert_eq!(
            tree,
            HuffmanTree::new(Node::internal(Node::leaf(3), Node::leaf(2)))
        );
    }

    #[test]
    fn test_single_symbol_wrapped() {
        let tree = HuffmanTree::from_frequencies(&freq(&[(2, 6)]));
        let root = tree.root().unwrap();

        assert_eq!(root.left(), Some(&Node::leaf(2)));
        assert_eq!(root.right(), None);
        assert_eq!(tree.internal_count(), 1);
    }

    #[test]
    fn test_empty_map_gives_empty_tree() {
        let tree = HuffmanTree::from_frequencies(&FrequencyMap::new());
        assert!(tree.is_empty());
        assert_eq!(tree.internal_count(), 0);
        assert!(tree.postorder_internal().is_empty());
    }

    #[test]
    fn test_tie_break_leaves_before_subtrees() {
        // a, b merge into weight 2; then c (leaf, 2) ties with that subtree
        // and must be taken first, landing on the left.
        let tree = HuffmanTree::from_frequencies(&freq(&[(b'a', 1), (b'b', 1), (b'c', 2)]));
        assert_eq!(
            tree,
            HuffmanTree::new(Node::internal(
                Node::leaf(b'c'),
                Node::internal(Node::leaf(b'a'), Node::leaf(b'b')),
            ))
        );
    }

    #[test]
    fn test_tie_break_by_symbol() {
        let tree = HuffmanTree::from_frequencies(&freq(&[(9, 5), (4, 5)]));
        assert_eq!(
            tree,
            HuffmanTree::new(Node::internal(Node::leaf(4), Node::leaf(9)))
        );
    }

    #[test]
    fn test_avg_length_example() {
        let tree = HuffmanTree::new(Node::internal(
            Node::internal(Node::leaf(3), Node::leaf(2)),
            Node::leaf(9),
        ));
        let freq = freq(&[(3, 2), (2, 7), (9, 1)]);

        assert_eq!(tree.weighted_length(&freq), 19);
        assert!((tree.avg_length(&freq) - 1.9).abs() < 1e-12);
    }

    #[test]
    fn test_built_tree_beats_example_tree() {
        let freq = freq(&[(3, 2), (2, 7), (9, 1)]);
        let tree = HuffmanTree::from_frequencies(&freq);

        // 9 and 3 merge first, 2 gets a one-bit code
        assert_eq!(tree.weighted_length(&freq), 13);
        assert!(tree.avg_length(&freq) <= 1.9);
    }

    #[test]
    fn test_postorder_numbering() {
        let left = Node::internal(Node::leaf(3), Node::leaf(2));
        let right = Node::internal(Node::leaf(9), Node::leaf(10));
        let tree = HuffmanTree::new(Node::internal(left.clone(), right.clone()));

        let numbered = tree.postorder_internal();
        assert_eq!(numbered.len(), 3);
        assert_eq!(numbered[0], &left);
        assert_eq!(numbered[1], &right);
        assert!(ptr::eq(numbered[2], tree.root().unwrap()));
    }

    #[test]
    fn test_internal_count() {
        let left = Node::internal(Node::leaf(99), Node::leaf(100));
        let right = Node::internal(
            Node::leaf(101),
            Node::internal(Node::leaf(97), Node::leaf(98)),
        );
        let tree = HuffmanTree::new(Node::internal(left, right));

        assert_eq!(tree.internal_count(), 4);
        assert_eq!(tree.symbols(), vec![99, 100, 101, 97, 98]);
    }

    #[test]
    fn test_deeply_skewed_tree() {
        // Fibonacci-like weights force a maximally deep tree.
        let mut weights = vec![1u64, 1];
        while weights.len() < 60 {
            let n = weights.len();
            weights.push(weights[n - 1] + weights[n - 2]);
        }
        let freq: FrequencyMap = weights
            .iter()
            .enumerate()
            .map(|(symbol, &w)| (symbol as u8, w))
            .collect();
        let tree = HuffmanTree::from_frequencies(&freq);

        assert_eq!(tree.internal_count(), 59);
        let codes = CodeTable::from_tree(&tree);
        let longest = codes.iter().map(|(_, code)| code.len()).max().unwrap();
        assert_eq!(longest, 59);
    }
}
