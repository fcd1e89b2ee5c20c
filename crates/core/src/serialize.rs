//! Flat node-record encoding of a Huffman tree.
//!
//! Each internal node becomes one 4-byte record:
//!
//! ```text
//! +-----------+------------+------------+-------------+
//! | left_type | left_value | right_type | right_value |
//! +-----------+------------+------------+-------------+
//! ```
//!
//! | type | meaning  | value                              |
//! |------|----------|------------------------------------|
//! | 0    | leaf     | the symbol                         |
//! | 1    | internal | postorder number of the child node |
//! | 2    | empty    | always 0 (single-symbol root only) |
//!
//! Records are written in postorder, so the root is always the last record.
//!
//! Two reconstruction schemes read the same records:
//! - [`TreeLayout::General`] follows the absolute node numbers stored in
//!   the records, so it works for any ordering of the list.
//! - [`TreeLayout::Postorder`] ignores the numbers and relies on postorder
//!   contiguity: the right child sits just before its parent, the left child
//!   just before the right subtree.
//!
//! Both decoders recurse, one frame per internal node. Record lists longer
//! than [`MAX_RECORDS`] are refused up front and no record is visited twice,
//! which bounds the depth.

use crate::error::{Result, TreeError};
use crate::tree::{HuffmanTree, Node};

/// Size of one serialized node record in bytes.
pub const RECORD_SIZE: usize = 4;

/// Largest record list a one-byte node count can describe.
pub const MAX_RECORDS: usize = u8::MAX as usize;

const TAG_LEAF: u8 = 0;
const TAG_INTERNAL: u8 = 1;
const TAG_EMPTY: u8 = 2;

/// One side of a node record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRef {
    Leaf(u8),
    /// Postorder number of an internal node
    Internal(u8),
    Empty,
}

impl ChildRef {
    fn to_bytes(self) -> [u8; 2] {
        match self {
            ChildRef::Leaf(symbol) => [TAG_LEAF, symbol],
            ChildRef::Internal(number) => [TAG_INTERNAL, number],
            ChildRef::Empty => [TAG_EMPTY, 0],
        }
    }

    fn from_bytes(tag: u8, value: u8, record: usize) -> Result<Self> {
        match tag {
            TAG_LEAF => Ok(ChildRef::Leaf(value)),
            TAG_INTERNAL => Ok(ChildRef::Internal(value)),
            TAG_EMPTY => Ok(ChildRef::Empty),
            _ => Err(TreeError::InvalidChildType { record, tag }.into()),
        }
    }
}

/// A serialized internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRecord {
    pub left: ChildRef,
    pub right: ChildRef,
}

impl NodeRecord {
    pub fn new(left: ChildRef, right: ChildRef) -> Self {
        Self { left, right }
    }

    pub fn to_bytes(self) -> [u8; RECORD_SIZE] {
        let [left_type, left_value] = self.left.to_bytes();
        let [right_type, right_value] = self.right.to_bytes();
        [left_type, left_value, right_type, right_value]
    }

    /// Parse one record; `index` is only used in error reports.
    pub fn from_bytes(bytes: [u8; RECORD_SIZE], index: usize) -> Result<Self> {
        Ok(Self {
            left: ChildRef::from_bytes(bytes[0], bytes[1], index)?,
            right: ChildRef::from_bytes(bytes[2], bytes[3], index)?,
        })
    }
}

/// Which reconstruction scheme to use when rebuilding a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeLayout {
    /// Resolve internal children by their stored postorder number
    #[default]
    General,
    /// Resolve internal children by position in a postorder list
    Postorder,
}

/// Serialize `tree` into postorder node records with absolute numbering.
///
/// Numbers are assigned while walking, so they always reflect the tree's
/// current shape. An empty tree gives no records.
///
/// # Errors
/// `TreeError::TooManyNodes` if the tree has more than 255 internal nodes.
pub fn tree_to_records(tree: &HuffmanTree) -> Result<Vec<NodeRecord>> {
    let count = tree.internal_count();
    if count > MAX_RECORDS {
        return Err(TreeError::TooManyNodes { count }.into());
    }

    let mut records = Vec::with_capacity(count);
    // References to finished subtrees, consumed by their parent
    let mut pending: Vec<ChildRef> = Vec::new();

    for node in tree.postorder() {
        match node {
            Node::Leaf { symbol } => pending.push(ChildRef::Leaf(*symbol)),
            Node::Internal { left, right } => {
                let right_ref = match right {
                    Some(_) => pending.pop().unwrap_or(ChildRef::Empty),
                    None => ChildRef::Empty,
                };
                let left_ref = match left {
                    Some(_) => pending.pop().unwrap_or(ChildRef::Empty),
                    None => ChildRef::Empty,
                };
                pending.push(ChildRef::Internal(records.len() as u8));
                records.push(NodeRecord::new(left_ref, right_ref));
            }
        }
    }

    Ok(records)
}

/// Serialize `tree` straight to bytes (`RECORD_SIZE` bytes per record).
pub fn tree_to_bytes(tree: &HuffmanTree) -> Result<Vec<u8>> {
    Ok(tree_to_records(tree)?
        .into_iter()
        .flat_map(NodeRecord::to_bytes)
        .collect())
}

/// Split `bytes` into records. Trailing bytes short of a full record are
/// ignored.
pub fn bytes_to_records(bytes: &[u8]) -> Result<Vec<NodeRecord>> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            NodeRecord::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]], index)
        })
        .collect()
}

/// Rebuild the tree rooted at `records[root_index]`.
///
/// # Errors
/// - `TreeError::TooManyNodes` if more than 255 records are given
/// - `TreeError::RootOutOfRange` if `root_index` names no record
/// - `TreeError::IndexOutOfRange` for references outside the list
/// - `TreeError::NodeReused` if general addressing revisits a record
pub fn records_to_tree(
    records: &[NodeRecord],
    root_index: usize,
    layout: TreeLayout,
) -> Result<HuffmanTree> {
    if records.len() > MAX_RECORDS {
        return Err(TreeError::TooManyNodes {
            count: records.len(),
        }
        .into());
    }
    if root_index >= records.len() {
        return Err(TreeError::RootOutOfRange {
            root: root_index,
            len: records.len(),
        }
        .into());
    }

    let root = match layout {
        TreeLayout::General => {
            let mut visited = vec![false; records.len()];
            build_general(records, root_index, &mut visited)?
        }
        TreeLayout::Postorder => build_postorder(records, root_index)?.0,
    };
    Ok(HuffmanTree::new(root))
}

fn build_general(records: &[NodeRecord], index: usize, visited: &mut [bool]) -> Result<Node> {
    if visited[index] {
        return Err(TreeError::NodeReused { index }.into());
    }
    visited[index] = true;

    let record = records[index];
    let left = general_child(records, index, record.left, visited)?;
    let right = general_child(records, index, record.right, visited)?;
    Ok(Node::Internal { left, right })
}

fn general_child(
    records: &[NodeRecord],
    parent: usize,
    child: ChildRef,
    visited: &mut [bool],
) -> Result<Option<Box<Node>>> {
    match child {
        ChildRef::Leaf(symbol) => Ok(Some(Box::new(Node::leaf(symbol)))),
        ChildRef::Empty => Ok(None),
        ChildRef::Internal(number) => {
            let target = number as usize;
            if target >= records.len() {
                return Err(TreeError::IndexOutOfRange {
                    record: parent,
                    index: target,
                    len: records.len(),
                }
                .into());
            }
            Ok(Some(Box::new(build_general(records, target, visited)?)))
        }
    }
}

/// Returns the subtree and its internal node count.
///
/// The right child is built first: its internal count tells where the left
/// subtree ends.
fn build_postorder(records: &[NodeRecord], index: usize) -> Result<(Node, usize)> {
    let record = records[index];

    let (right, right_count) = postorder_child(records, index, record.right, 1)?;
    let (left, left_count) = postorder_child(records, index, record.left, 1 + right_count)?;

    Ok((Node::Internal { left, right }, 1 + left_count + right_count))
}

/// Resolve `child` of `records[parent]`; an internal child lives `offset`
/// records before its parent.
fn postorder_child(
    records: &[NodeRecord],
    parent: usize,
    child: ChildRef,
    offset: usize,
) -> Result<(Option<Box<Node>>, usize)> {
    match child {
        ChildRef::Leaf(symbol) => Ok((Some(Box::new(Node::leaf(symbol))), 0)),
        ChildRef::Empty => Ok((None, 0)),
        ChildRef::Internal(_) => {
            let target = parent.checked_sub(offset).ok_or(TreeError::IndexOutOfRange {
                record: parent,
                index: 0,
                len: records.len(),
            })?;
            let (node, count) = build_postorder(records, target)?;
            Ok((Some(Box::new(node)), count))
        }
    }
}
