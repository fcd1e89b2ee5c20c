//! Per-symbol bit strings derived from a Huffman tree.
//!
//! A code is the root-to-leaf path of a symbol: `0` for every left edge,
//! `1` for every right edge. Trees with up to 256 leaves can be skewed
//! enough to produce codes longer than any machine word, so codes are
//! stored as bit vectors rather than packed integers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, HuffmanError};
use crate::tree::{HuffmanTree, Node};

/// A sequence of bits, first bit first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn extended(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Code {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(HuffmanError::MalformedCode(s.to_string()).into()),
            })
            .collect::<Result<Vec<_>, Error>>()
            .map(|bits| Code { bits })
    }
}

/// Symbol to code mapping, iterated in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Derive the code of every leaf reachable from the root.
    ///
    /// An empty tree yields an empty table. A leaf at the root gets the
    /// empty code, which only arises from hand-built trees; trees from
    /// [`HuffmanTree::from_frequencies`] always give codes of length >= 1.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        let Some(root) = tree.root() else {
            return Self { codes };
        };

        let mut stack: Vec<(&Node, Code)> = vec![(root, Code::new())];
        while let Some((node, path)) = stack.pop() {
            match node {
                Node::Leaf { symbol } => {
                    codes.insert(*symbol, path);
                }
                Node::Internal { left, right } => {
                    if let Some(right) = right.as_deref() {
                        stack.push((right, path.extended(true)));
                    }
                    if let Some(left) = left.as_deref() {
                        stack.push((left, path.extended(false)));
                    }
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.codes.insert(symbol, code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }

    /// Check that no code is a prefix of another.
    ///
    /// After sorting, any prefix relation shows up between neighbours, so a
    /// single pass over adjacent pairs is enough.
    pub fn is_prefix_free(&self) -> bool {
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

impl FromIterator<(u8, Code)> for CodeTable {
    fn from_iter<I: IntoIterator<Item = (u8, Code)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
