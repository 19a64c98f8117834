//! Obliqueness-driven binarization.

use std::collections::BTreeSet;

use itertools::Itertools;
use udtree::graph::{DepTree, DepTriple};

use crate::oblique::ObliquenessTable;
use crate::{is_lifted, strip_lift, Error};

/// Handle of a node in a [`BinaryTree`] arena.
pub type NodeId = usize;

/// Node of a binary tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BinaryNode {
    /// A leaf wrapping one original token.
    Leaf {
        /// Token index in the dependency tree.
        idx: usize,
    },

    /// The combination of two subtrees.
    Branch {
        /// Index of the dependent token whose relation labels this node.
        idx: usize,

        /// Relation label, lift marker stripped.
        relation: String,

        /// Whether the labeling arc was lifted.
        lifted: bool,

        /// The two ordered children: the growing core first, the
        /// attached dependent subtree second.
        children: [NodeId; 2],
    },
}

impl BinaryNode {
    /// Token index of the node's governing word.
    pub fn idx(&self) -> usize {
        match self {
            BinaryNode::Leaf { idx } => *idx,
            BinaryNode::Branch { idx, .. } => *idx,
        }
    }
}

/// A strictly binary tree over the tokens of one sentence.
///
/// The tree owns its nodes in an arena; nodes are created bottom-up
/// during binarization and never mutated after creation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BinaryTree {
    nodes: Vec<BinaryNode>,
    root: NodeId,
}

#[allow(clippy::len_without_is_empty)]
impl BinaryTree {
    /// Get the root node's handle.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get the node behind a handle.
    pub fn node(&self, id: NodeId) -> &BinaryNode {
        &self.nodes[id]
    }

    /// Get the number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Collect the token indices of all leaves below `id`, including
    /// `id` itself when it is a leaf.
    pub fn leaf_indices(&self, id: NodeId) -> BTreeSet<usize> {
        let mut indices = BTreeSet::new();
        self.collect_leaf_indices(id, &mut indices);
        indices
    }

    fn collect_leaf_indices(&self, id: NodeId, indices: &mut BTreeSet<usize>) {
        match &self.nodes[id] {
            BinaryNode::Leaf { idx } => {
                indices.insert(*idx);
            }
            BinaryNode::Branch { children, .. } => {
                self.collect_leaf_indices(children[0], indices);
                self.collect_leaf_indices(children[1], indices);
            }
        }
    }
}

/// Converter from dependency trees to strictly binary trees.
///
/// Sibling combination order follows the obliqueness hierarchy:
/// children on both sides of the governing word are merged by score,
/// proximal children first, with ties resolved toward the left side.
pub struct Binarizer<'a> {
    table: &'a ObliquenessTable,
}

impl<'a> Binarizer<'a> {
    pub fn new(table: &'a ObliquenessTable) -> Self {
        Binarizer { table }
    }

    /// Binarize `tree`, starting at the root's single dependent.
    ///
    /// The synthetic root is excluded from the result; the leaves of
    /// the binary tree are exactly the tokens of `tree`.
    pub fn binarize(&self, tree: &DepTree) -> Result<BinaryTree, Error> {
        let root = tree.root()?;

        let mut nodes = Vec::new();
        let root_id = self.binarize_at(tree, root, &mut nodes)?;

        Ok(BinaryTree {
            nodes,
            root: root_id,
        })
    }

    fn binarize_at(
        &self,
        tree: &DepTree,
        parent: usize,
        nodes: &mut Vec<BinaryNode>,
    ) -> Result<NodeId, Error> {
        let children: Vec<DepTriple<&str>> = tree.dependents(parent).collect_vec();
        let order = self.oblique_order(parent, &children)?;

        // Fold the ordered children around the parent's own leaf.
        let mut acc = push_node(nodes, BinaryNode::Leaf { idx: parent });

        for pos in order {
            let triple = &children[pos];
            let subtree = self.binarize_at(tree, triple.dependent(), nodes)?;

            let relation = triple.relation();
            acc = push_node(
                nodes,
                BinaryNode::Branch {
                    idx: triple.dependent(),
                    relation: strip_lift(relation).to_owned(),
                    lifted: is_lifted(relation),
                    children: [acc, subtree],
                },
            );
        }

        Ok(acc)
    }

    /// Determine the combination order of `parent`'s children.
    ///
    /// The children (in ascending index order) are split at `parent`
    /// into a left and a right sequence. Both are consumed from the
    /// side closest to `parent`; of the two proximal candidates, the
    /// one with the lower score combines first, the left side winning
    /// ties. Returns positions into `children`.
    fn oblique_order(
        &self,
        parent: usize,
        children: &[DepTriple<&str>],
    ) -> Result<Vec<usize>, Error> {
        let scores: Vec<u32> = children
            .iter()
            .map(|triple| self.table.score(triple.relation()))
            .collect::<Result<_, _>>()?;

        let split = children
            .iter()
            .take_while(|triple| triple.dependent() < parent)
            .count();

        let mut order = Vec::with_capacity(children.len());
        let mut left = split;
        let mut right = split;

        while left > 0 || right < children.len() {
            let take_left = if left == 0 {
                false
            } else if right == children.len() {
                true
            } else {
                scores[left - 1] <= scores[right]
            };

            if take_left {
                left -= 1;
                order.push(left);
            } else {
                order.push(right);
                right += 1;
            }
        }

        Ok(order)
    }
}

fn push_node(nodes: &mut Vec<BinaryNode>, node: BinaryNode) -> NodeId {
    nodes.push(node);
    nodes.len() - 1
}
