//! The binary expression tree.
//!
//! Nodes live in a flat arena (`Vec`) and are addressed by [`NodeId`], a
//! stable index that doubles as the key for every per-node side table: the
//! evaluation record, the layout position map, and the per-run state table.
//!
//! The tree is strictly binary — every internal node has exactly two
//! children, leaves have none — and that invariant is encoded in the node
//! type itself (`children: Option<(NodeId, NodeId)>`). A tree is built once
//! via [`TreeBuilder`] and is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for one node of an [`ExprTree`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The arena index this id refers to.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// One node of the expression tree.
///
/// `label` is either a numeral lexeme (leaf) or one of `+ - * /` (internal).
#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub label: String,
    pub children: Option<(NodeId, NodeId)>,
}

/// An immutable binary expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprTree {
    nodes: Vec<ExprNode>,
    root: NodeId,
}

impl ExprTree {
    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Total node count.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    ///
    /// Cannot happen for builder-produced trees, which always have a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The label of a node.
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.index()].label
    }

    /// The children of a node — `Some((left, right))` for internal nodes,
    /// `None` for leaves.
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.nodes[id.index()].children
    }

    /// Returns `true` if the node is a leaf.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.index()].children.is_none()
    }

    /// Iterate over all node ids in arena order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Number of internal (operator) nodes.
    pub fn internal_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_some()).count()
    }

    /// Number of leaf (operand) nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.children.is_none()).count()
    }
}

/// Incremental builder for an [`ExprTree`].
///
/// Children must be pushed before their parent, so arena order is a valid
/// bottom-up order. `finish` pins the root.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<ExprNode>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf node and return its id.
    pub fn leaf(&mut self, label: impl Into<String>) -> NodeId {
        self.push(ExprNode {
            label: label.into(),
            children: None,
        })
    }

    /// Add an internal node with two children and return its id.
    pub fn internal(&mut self, label: impl Into<String>, left: NodeId, right: NodeId) -> NodeId {
        assert!(
            left.index() < self.nodes.len() && right.index() < self.nodes.len(),
            "children must be added before their parent"
        );
        self.push(ExprNode {
            label: label.into(),
            children: Some((left, right)),
        })
    }

    /// Finish the tree with the given root.
    pub fn finish(self, root: NodeId) -> ExprTree {
        assert!(root.index() < self.nodes.len(), "root id out of range");
        ExprTree {
            nodes: self.nodes,
            root,
        }
    }

    fn push(&mut self, node: ExprNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
