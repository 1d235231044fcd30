//! Huffman tree construction.
//!
//! The builder keeps the live nodes in a vector sorted by weight, heaviest
//! first. Each step pops the two lightest nodes off the tail, joins them under
//! a new internal node and bubbles that node back toward the front until the
//! order is restored. With at most 256 symbols the quadratic worst case is
//! irrelevant, and the result is a minimum weighted-path-length tree just like
//! the priority-queue formulation.

use crate::compression::frequency::FrequencyTable;
use log::trace;

/// A node in the Huffman tree.
///
/// Each internal node owns its two children outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A leaf holds one symbol and its occurrence count.
    ///
    /// Trees read back from a compressed stream carry a weight of zero.
    Leaf { symbol: u8, weight: u64 },
    /// An internal node with the combined weight of its two subtrees.
    Internal {
        weight: u64,
        zero: Box<HuffmanNode>,
        one: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    /// Creates an internal node whose weight is the sum of its children.
    pub fn join(zero: HuffmanNode, one: HuffmanNode) -> Self {
        HuffmanNode::Internal {
            weight: zero.weight() + one.weight(),
            zero: Box::new(zero),
            one: Box::new(one),
        }
    }

    /// Returns the weight of the node.
    pub fn weight(&self) -> u64 {
        match self {
            HuffmanNode::Leaf { weight, .. } => *weight,
            HuffmanNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanNode::Leaf { .. })
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            HuffmanNode::Leaf { .. } => 1,
            HuffmanNode::Internal { zero, one, .. } => zero.leaf_count() + one.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path; zero for a lone leaf.
    pub fn depth(&self) -> u32 {
        match self {
            HuffmanNode::Leaf { .. } => 0,
            HuffmanNode::Internal { zero, one, .. } => 1 + zero.depth().max(one.depth()),
        }
    }

    /// Sum over all leaves of weight times depth.
    pub fn weighted_path_length(&self) -> u64 {
        fn walk(node: &HuffmanNode, depth: u64) -> u64 {
            match node {
                HuffmanNode::Leaf { weight, .. } => weight * depth,
                HuffmanNode::Internal { zero, one, .. } => {
                    walk(zero, depth + 1) + walk(one, depth + 1)
                }
            }
        }
        walk(self, 0)
    }

    /// Whether both trees have the same shape and the same symbol at every
    /// leaf. Weights are ignored.
    pub fn same_shape(&self, other: &HuffmanNode) -> bool {
        match (self, other) {
            (HuffmanNode::Leaf { symbol: a, .. }, HuffmanNode::Leaf { symbol: b, .. }) => a == b,
            (
                HuffmanNode::Internal {
                    zero: zero_a,
                    one: one_a,
                    ..
                },
                HuffmanNode::Internal {
                    zero: zero_b,
                    one: one_b,
                    ..
                },
            ) => zero_a.same_shape(zero_b) && one_a.same_shape(one_b),
            _ => false,
        }
    }
}

/// Build the Huffman tree for the symbols that occur in `freq_table`.
///
/// Returns `None` if no symbol occurs. A table with a single distinct symbol
/// yields a lone leaf.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<HuffmanNode> {
    let mut nodes: Vec<HuffmanNode> = freq_table
        .nonzero()
        .map(|(symbol, weight)| HuffmanNode::Leaf { symbol, weight })
        .collect();
    // Stable sort keeps ascending symbol order among equal weights.
    nodes.sort_by(|a, b| b.weight().cmp(&a.weight()));

    while nodes.len() > 1 {
        let lightest = nodes.pop()?;
        let next = nodes.pop()?;
        // The heavier child takes the zero branch.
        nodes.push(HuffmanNode::join(next, lightest));

        let mut i = nodes.len() - 1;
        while i > 0 && nodes[i].weight() > nodes[i - 1].weight() {
            nodes.swap(i, i - 1);
            i -= 1;
        }
    }

    let root = nodes.pop()?;
    trace!(
        "built tree: {} leaves, depth {}, weighted path length {}",
        root.leaf_count(),
        root.depth(),
        root.weighted_path_length()
    );
    Some(root)
}
