//! Structural checks for plans that did not come from the builder.

use fxhash::FxHashSet;
use smallvec::{smallvec, SmallVec};

use super::types::{PlanNode, WindowPlan, NO_PARENT};
use crate::error::PlanError;
use crate::permutation::{factorial, identity, Edge, EdgeSet, PermutationKey, MAX_WINDOW_LENGTH};

impl WindowPlan {
    /// Checks every invariant the evaluator relies on.
    ///
    /// Plans from [`MoveTreeBuilder`](super::MoveTreeBuilder) always pass.
    /// Deserialized plans go through this before they are handed out.
    ///
    /// Verifies the node and permutation counts, the root, the pre-order
    /// nesting of subtrees, depths, edge endpoints, that every permutation
    /// is a distinct ordering of `1..=L`, and that each node's recorded move
    /// turns its parent's edge set into its own.
    pub fn validate(&self) -> Result<(), PlanError> {
        let length = self.length;
        let malformed = |reason| PlanError::MalformedPlan { length, reason };

        if length == 0 || length > MAX_WINDOW_LENGTH {
            return Err(PlanError::InvalidLength {
                length,
                max: MAX_WINDOW_LENGTH,
            });
        }
        if Some(self.nodes.len()) != factorial(length) {
            return Err(malformed("node count is not L!"));
        }
        if self.permutations.len() != length * self.nodes.len() {
            return Err(malformed("permutation table does not hold L bytes per node"));
        }

        let root = &self.nodes[0];
        if root.parent != NO_PARENT || root.depth != 0 {
            return Err(PlanError::CorruptNode {
                node: 0,
                reason: "root must have no parent and depth 0",
            });
        }
        if root.subtree_end() != self.nodes.len() {
            return Err(PlanError::CorruptNode {
                node: 0,
                reason: "root subtree must span the whole plan",
            });
        }
        if root.added != [Edge::VOID; 2] || root.removed != [Edge::VOID; 2] {
            return Err(PlanError::CorruptNode {
                node: 0,
                reason: "root carries a move",
            });
        }
        if self.permutation(0) != identity(length).as_slice() {
            return Err(PlanError::CorruptNode {
                node: 0,
                reason: "root is not the canonical ordering",
            });
        }

        let mut seen = FxHashSet::default();
        let mut ancestors: SmallVec<[usize; 16]> = smallvec![0];
        let mut max_depth = 0;

        for (index, node) in self.nodes.iter().enumerate() {
            let corrupt = |reason| PlanError::CorruptNode {
                node: index,
                reason,
            };
            let perm = self.permutation(index);
            if !is_ordering(perm) {
                return Err(corrupt("permutation is not an ordering of 1..=L"));
            }
            if !seen.insert(PermutationKey::from_slice(perm)) {
                return Err(corrupt("permutation appears twice"));
            }
            if index == 0 {
                continue;
            }

            while let Some(&top) = ancestors.last() {
                if self.nodes[top].subtree_end() > index {
                    break;
                }
                ancestors.pop();
            }
            let parent = node.parent().ok_or(corrupt("second root"))?;
            if ancestors.last() != Some(&parent) {
                return Err(corrupt("parent is not the enclosing subtree"));
            }
            if node.depth() != ancestors.len() {
                return Err(corrupt("depth is not parent depth + 1"));
            }
            if node.subtree_end() <= index
                || node.subtree_end() > self.nodes[parent].subtree_end()
            {
                return Err(corrupt("subtree end out of range"));
            }
            if !edges_in_range(node, length) {
                return Err(corrupt("edge endpoint outside the window"));
            }
            let rebuilt =
                EdgeSet::of(self.permutation(parent)).apply(&node.added, &node.removed);
            if rebuilt != EdgeSet::of(perm) {
                return Err(corrupt("recorded move does not rebuild the edge set"));
            }

            max_depth = max_depth.max(node.depth());
            ancestors.push(index);
        }

        if max_depth != self.max_depth {
            return Err(malformed("max depth does not match the deepest node"));
        }
        Ok(())
    }
}

fn is_ordering(perm: &[u8]) -> bool {
    let mut mask = 0u32;
    for &value in perm {
        if value == 0 || value as usize > perm.len() {
            return false;
        }
        mask |= 1 << value;
    }
    mask.count_ones() as usize == perm.len()
}

fn edges_in_range(node: &PlanNode, length: usize) -> bool {
    let after = length + 1;
    node.added
        .iter()
        .chain(node.removed.iter())
        .all(|e| e.low() <= e.high() && e.high() as usize <= after)
}

/// Wire form of a [`WindowPlan`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
pub(crate) struct RawWindowPlan {
    length: usize,
    nodes: Vec<PlanNode>,
    permutations: Vec<u8>,
    max_depth: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawWindowPlan> for WindowPlan {
    type Error = PlanError;

    fn try_from(raw: RawWindowPlan) -> Result<Self, PlanError> {
        let plan = WindowPlan {
            length: raw.length,
            nodes: raw.nodes,
            permutations: raw.permutations,
            max_depth: raw.max_depth,
        };
        plan.validate()?;
        Ok(plan)
    }
}
