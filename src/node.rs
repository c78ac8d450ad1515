//! Internal node implementation for the prefix tree.
//!
//! Nodes are stored in a slab owned by the `PrefixTree`. Each node owns its
//! outgoing edges through the `children` map, and keeps a plain index back to
//! its parent which is only used to walk upward when a key is removed.

use std::collections::BTreeMap;

/// Index of a node inside the tree's slab.
pub(crate) type NodeIndex = usize;

/// A single node of the prefix tree.
///
/// A node stands for the byte prefix spelled by the edge labels on the path
/// from the root.
#[derive(Debug, Clone)]
pub(crate) struct Node<V> {
    /// Child nodes indexed by the byte labelling the edge to them
    pub children: BTreeMap<u8, NodeIndex>,

    /// The parent node and the label of the edge from it, `None` for the root
    pub parent: Option<(NodeIndex, u8)>,

    /// The value stored at this node, if a key ends here
    pub value: Option<V>,

    /// Number of keys stored in the subtree rooted at this node, this node included
    pub count: usize,
}

impl<V> Node<V> {
    /// Creates the root node.
    pub fn root() -> Self {
        Node {
            children: BTreeMap::new(),
            parent: None,
            value: None,
            count: 0,
        }
    }

    /// Creates an empty node hanging off `parent` under the edge `byte`.
    pub fn with_parent(parent: NodeIndex, byte: u8) -> Self {
        Node {
            children: BTreeMap::new(),
            parent: Some((parent, byte)),
            value: None,
            count: 0,
        }
    }

    /// Whether any key is stored in this subtree.
    ///
    /// Nodes with a zero count may linger after a removal; every read
    /// operation treats them as absent.
    pub fn is_live(&self) -> bool {
        self.count > 0
    }

    /// Returns whether this node has no outgoing edges
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, byte: u8) -> Option<NodeIndex> {
        self.children.get(&byte).copied()
    }
}
