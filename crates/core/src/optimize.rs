//! Symbol reassignment within a fixed tree shape.
//!
//! Leaves are visited in level order (shallowest first) and handed symbols
//! in descending frequency. Level order visits leaves in non-decreasing
//! depth, so this never increases the weighted code length for the given
//! frequencies. The tree's shape and code lengths are untouched; only the
//! symbol-to-code mapping changes.

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyMap;
use crate::tree::{HuffmanTree, Node};

/// Reassign the tree's leaf symbols to minimize weighted length under `freq`.
///
/// The symbols shuffled are exactly the tree's current leaves. A leaf
/// symbol absent from `freq` counts as frequency 0. Among equal
/// frequencies, the smaller symbol gets the shallower leaf.
///
/// # Errors
/// `HuffmanError::AlphabetMismatch` if `freq` names a symbol that is not a
/// leaf of `tree`. The tree is left unchanged in that case.
pub fn improve_tree(tree: &mut HuffmanTree, freq: &FrequencyMap) -> Result<()> {
    let symbols = tree.symbols();
    if let Some((symbol, _)) = freq.iter().find(|(symbol, _)| !symbols.contains(symbol)) {
        return Err(HuffmanError::AlphabetMismatch { symbol }.into());
    }

    // Ascending, so `pop` yields the most frequent remaining symbol
    let mut ranked: Vec<(u64, Reverse<u8>)> = symbols
        .into_iter()
        .map(|symbol| (freq.get(symbol).unwrap_or(0), Reverse(symbol)))
        .collect();
    ranked.sort_unstable();

    let Some(root) = tree.root_mut() else {
        return Ok(());
    };

    let mut queue: VecDeque<&mut Node> = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        match node {
            Node::Leaf { symbol } => {
                if let Some((_, Reverse(best))) = ranked.pop() {
                    *symbol = best;
                }
            }
            Node::Internal { left, right } => {
                if let Some(left) = left.as_deref_mut() {
                    queue.push_back(left);
                }
                if let Some(right) = right.as_deref_mut() {
                    queue.push_back(right);
                }
            }
        }
    }

    Ok(())
}
