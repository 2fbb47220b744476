//! Huffman tree construction.
//!
//! The tree lives in a flat arena: nodes are stored in a `Vec` and children
//! are referenced by index, so the whole tree is released in one drop.
//!
//! # Tie-breaking
//!
//! Leaves enter the arena in ascending symbol order (bytes 0-255, then the
//! end-marker) and every merged node is appended after them. The priority
//! queue orders by `(weight, arena index)`, so among equal weights the node
//! created earliest is extracted first. The first node extracted in a merge
//! becomes the left (`0`) child, the second the right (`1`) child.

use crate::frequency::FrequencyTable;
use crate::symbol::Symbol;
use log::debug;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node in the tree arena.
pub type NodeId = usize;

/// Leaf or internal node payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Terminal node carrying a symbol.
    Leaf(Symbol),
    /// Branch with exactly two children.
    Internal {
        /// Child reached on a `0` bit.
        left: NodeId,
        /// Child reached on a `1` bit.
        right: NodeId,
    },
}

/// A tree node with its weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Symbol count for leaves, sum of children for internal nodes.
    pub weight: u64,
    /// Node payload.
    pub kind: NodeKind,
}

/// A Huffman tree built by greedy minimum-weight merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// With a single distinct symbol the result is one leaf and no internal
    /// node; the root is then that leaf.
    pub fn from_frequencies(table: &FrequencyTable) -> Self {
        let leaves = table.distinct_symbols();
        let mut nodes = Vec::with_capacity(2 * leaves - 1);
        let mut heap = BinaryHeap::with_capacity(leaves);

        for (symbol, weight) in table.iter() {
            heap.push(Reverse((weight, nodes.len())));
            nodes.push(Node {
                weight,
                kind: NodeKind::Leaf(symbol),
            });
        }

        let root = loop {
            match (heap.pop(), heap.pop()) {
                (Some(Reverse((left_weight, left))), Some(Reverse((right_weight, right)))) => {
                    let weight = left_weight.saturating_add(right_weight);
                    heap.push(Reverse((weight, nodes.len())));
                    nodes.push(Node {
                        weight,
                        kind: NodeKind::Internal { left, right },
                    });
                }
                (Some(Reverse((_, root))), None) => break root,
                (None, _) => unreachable!("frequency table always holds the end-marker"),
            }
        };

        let tree = Self { nodes, root };
        debug!(
            "built Huffman tree: {} leaves, {} internal nodes, depth {}",
            tree.leaf_count(),
            tree.internal_count(),
            tree.depth()
        );
        tree
    }

    /// Root node index.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node at `id`.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Symbol at `id` if it is a leaf.
    pub fn symbol(&self, id: NodeId) -> Option<Symbol> {
        match self.nodes[id].kind {
            NodeKind::Leaf(symbol) => Some(symbol),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Whether `id` is a leaf.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Leaf(_))
    }

    /// Child of `id` on `bit` (0 = left, anything else = right).
    ///
    /// Returns `None` for a leaf.
    #[inline]
    pub fn child(&self, id: NodeId, bit: u8) -> Option<NodeId> {
        match self.nodes[id].kind {
            NodeKind::Internal { left, right } => Some(if bit == 0 { left } else { right }),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Whether the tree is a lone leaf with no internal node.
    pub fn is_degenerate(&self) -> bool {
        self.is_leaf(self.root)
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf(_)))
            .count()
    }

    /// Number of internal nodes.
    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    /// Weight of the root, i.e. the total symbol count.
    pub fn root_weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes[id].kind {
                NodeKind::Leaf(_) => max_depth = max_depth.max(depth),
                NodeKind::Internal { left, right } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
            }
        }
        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_leaves() {
        let table = FrequencyTable::from_bytes(b"aaaa");
        let tree = HuffmanTree::from_frequencies(&table);

        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.internal_count(), 1);
        assert_eq!(tree.root_weight(), 5);
        // End-marker (weight 1) is extracted first and goes left
        let left = tree.child(tree.root(), 0).unwrap();
        let right = tree.child(tree.root(), 1).unwrap();
        assert_eq!(tree.symbol(left), Some(Symbol::EndMarker));
        assert_eq!(tree.symbol(right), Some(Symbol::Byte(b'a')));
    }

    #[test]
    fn test_single_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::new());
        assert!(tree.is_degenerate());
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.internal_count(), 0);
        assert_eq!(tree.symbol(tree.root()), Some(Symbol::EndMarker));
        assert_eq!(tree.child(tree.root(), 0), None);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_full_alphabet_shape() {
        let data: Vec<u8> = (0..=255).collect();
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));
        assert_eq!(tree.leaf_count(), 257);
        assert_eq!(tree.internal_count(), 256);
        assert_eq!(tree.root_weight(), 257);
    }

    #[test]
    fn test_internal_weights_are_sums() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(
            b"the quick brown fox jumps over the lazy dog",
        ));
        for node in tree.nodes() {
            if let NodeKind::Internal { left, right } = node.kind {
                assert_eq!(node.weight, tree.node(left).weight + tree.node(right).weight);
            }
        }
    }

    #[test]
    fn test_frequent_symbols_are_shallow() {
        let mut data = vec![b'e'; 100];
        data.extend_from_slice(b"xyz");
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&data));
        // 'e' outweighs everything else combined, so it hangs off the root
        let right = tree.child(tree.root(), 1).unwrap();
        assert_eq!(tree.symbol(right), Some(Symbol::Byte(b'e')));
    }

    #[test]
    fn test_deterministic() {
        let table = FrequencyTable::from_bytes(b"abcdabcdabcd");
        assert_eq!(
            HuffmanTree::from_frequencies(&table),
            HuffmanTree::from_frequencies(&table)
        );
    }

    #[test]
    fn test_huge_weights_saturate() {
        let table = FrequencyTable::from_counts([(Symbol::Byte(0), u64::MAX), (Symbol::Byte(1), 1)]);
        let tree = HuffmanTree::from_frequencies(&table);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.internal_count(), 2);
        assert_eq!(tree.root_weight(), u64::MAX);
    }

    #[test]
    fn test_skewed_weights_depth() {
        // Doubling weights chain every merge onto the previous one
        let weights = [1u64, 2, 4, 8, 16, 32, 64, 128];
        let table = FrequencyTable::from_counts(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (Symbol::Byte(i as u8), w)),
        );
        let tree = HuffmanTree::from_frequencies(&table);
        assert_eq!(tree.leaf_count(), 9);
        assert_eq!(tree.depth(), 8);
    }
}
