//! Plan arena types.

use crate::permutation::Edge;

#[cfg(feature = "serde")]
use super::validate::RawWindowPlan;

/// Parent sentinel of the root node.
pub(crate) const NO_PARENT: u32 = u32::MAX;

/// One ordering of the window inside a [`WindowPlan`].
///
/// Holds the two edges the 2-opt move from the parent adds and the two it
/// removes. Missing edges (never for a real 2-opt move) are
/// [`Edge::VOID`], which costs nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanNode {
    pub(crate) parent: u32,
    pub(crate) subtree_end: u32,
    pub(crate) depth: u8,
    pub(crate) added: [Edge; 2],
    pub(crate) removed: [Edge; 2],
}

impl PlanNode {
    pub(crate) fn root() -> Self {
        PlanNode {
            parent: NO_PARENT,
            subtree_end: 1,
            depth: 0,
            added: [Edge::VOID; 2],
            removed: [Edge::VOID; 2],
        }
    }

    /// Index of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        (self.parent != NO_PARENT).then_some(self.parent as usize)
    }

    /// Distance from the root in moves.
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// One past the last node of this node's subtree in pre-order.
    pub fn subtree_end(&self) -> usize {
        self.subtree_end as usize
    }

    pub fn added(&self) -> &[Edge; 2] {
        &self.added
    }

    pub fn removed(&self) -> &[Edge; 2] {
        &self.removed
    }

    pub fn is_root(&self) -> bool {
        self.parent == NO_PARENT
    }
}

/// Move tree over every ordering of a window of fixed length.
///
/// Nodes live in one arena in depth-first pre-order: node `0` is the
/// canonical (identity) ordering, every parent precedes its children, and
/// the subtree of node `i` spans `i..subtree_end(i)`. Permutations are
/// stored flat, `length` bytes per node.
///
/// Immutable once built; share it behind an [`Arc`](std::sync::Arc).
/// With the `serde` feature a plan can be persisted; deserialization runs
/// [`WindowPlan::validate`] and rejects anything the builder could not
/// have produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawWindowPlan")
)]
pub struct WindowPlan {
    pub(crate) length: usize,
    pub(crate) nodes: Vec<PlanNode>,
    pub(crate) permutations: Vec<u8>,
    pub(crate) max_depth: usize,
}

impl WindowPlan {
    /// Interior window length `L`.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of orderings in the plan (`L!`).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest node's distance from the root.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn root(&self) -> &PlanNode {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &PlanNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[PlanNode] {
        &self.nodes
    }

    pub fn parent(&self, index: usize) -> Option<usize> {
        self.nodes[index].parent()
    }

    /// Ordering of node `index`: content index placed at each interior
    /// position.
    pub fn permutation(&self, index: usize) -> &[u8] {
        let start = index * self.length;
        &self.permutations[start..start + self.length]
    }

    /// Children of node `index` in the order they were claimed.
    pub fn children(&self, index: usize) -> Children<'_> {
        Children {
            nodes: &self.nodes,
            next: index + 1,
            end: self.nodes[index].subtree_end(),
        }
    }

    /// Iterates `(index, node, permutation)` in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PlanNode, &[u8])> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(move |(i, node)| (i, node, self.permutation(i)))
    }
}

/// Iterator over the direct children of a plan node.
#[derive(Debug, Clone)]
pub struct Children<'a> {
    nodes: &'a [PlanNode],
    next: usize,
    end: usize,
}

impl Iterator for Children<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.end {
            return None;
        }
        let child = self.next;
        self.next = self.nodes[child].subtree_end();
        Some(child)
    }
}
