//! Greedy move-tree construction.
//!
//! # Algorithm
//!
//! 1. Enumerate all `L!` orderings (Johnson–Trotter order). The identity is
//!    claimed as the root; every other ordering starts in the unassigned pool
//! 2. Claimed orderings become *owners* in the order they were claimed. An
//!    owner claims, in enumeration order, every unassigned ordering whose
//!    edge set differs from its own by at most two added and two removed
//!    edges; claimed orderings are appended to the owner queue
//! 3. Stop when the pool is empty or the owner queue is exhausted. Anything
//!    left in the pool is an invariant violation and aborts the build
//! 4. Lay the tree out in depth-first pre-order
//!
//! With both anchors fixed, the only orderings within two edges of an owner
//! are its segment reversals (remove two edges, reconnect the middle piece
//! reversed). Instead of scanning the whole pool per owner, candidates are
//! generated as the `L(L-1)/2` reversals and looked up by packed key, then
//! sorted back into enumeration order. Each candidate is still verified by
//! sorted edge-list set difference before it is accepted.
//!
//! # Complexity
//!
//! O(L! · L³) time, O(L! · L) memory.

use std::time::Instant;

use fixedbitset::FixedBitSet;
use fxhash::FxHashMap;
use tracing::debug;

use super::types::{PlanNode, WindowPlan, NO_PARENT};
use crate::error::PlanError;
use crate::permutation::{
    factorial, Edge, EdgeSet, EdgeSetDiff, PermutationKey, Permutations, MAX_WINDOW_LENGTH,
};

/// A claimed ordering in breadth-first claim order.
struct Claim {
    /// Position in enumeration order.
    ordinal: u32,
    /// Position of the owner in the claim list.
    owner: u32,
    /// Range of this claim's children in the claim list.
    first_child: u32,
    child_count: u32,
    added: [Edge; 2],
    removed: [Edge; 2],
}

/// Builds the [`WindowPlan`] for one window length.
///
/// # Examples
///
/// ```
/// use u_windowopt::plan::MoveTreeBuilder;
///
/// let plan = MoveTreeBuilder::new(4).unwrap().build().unwrap();
/// assert_eq!(plan.len(), 24);
/// assert_eq!(plan.permutation(0), &[1, 2, 3, 4]);
/// assert!(plan.root().parent().is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoveTreeBuilder {
    length: usize,
}

impl MoveTreeBuilder {
    /// Creates a builder, rejecting lengths outside `1..=MAX_WINDOW_LENGTH`.
    pub fn new(length: usize) -> Result<Self, PlanError> {
        if length == 0 || length > MAX_WINDOW_LENGTH {
            return Err(PlanError::InvalidLength {
                length,
                max: MAX_WINDOW_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Enumerates, claims and lays out the full move tree.
    pub fn build(&self) -> Result<WindowPlan, PlanError> {
        let started = Instant::now();
        let length = self.length;
        debug!(length, "building window plan");

        let (enumerated, index) = self.enumerate()?;
        let claims = self.claim(&enumerated, &index)?;
        let plan = self.lay_out(&enumerated, &claims);

        debug!(
            length,
            nodes = plan.len(),
            max_depth = plan.max_depth(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "window plan built"
        );
        Ok(plan)
    }

    /// Collects every ordering in enumeration order plus a key index.
    fn enumerate(&self) -> Result<(Vec<u8>, FxHashMap<PermutationKey, u32>), PlanError> {
        let length = self.length;
        let expected = factorial(length).ok_or(PlanError::InvalidLength {
            length,
            max: MAX_WINDOW_LENGTH,
        })?;

        let mut enumerated = Vec::with_capacity(expected * length);
        let mut index = FxHashMap::default();
        index.reserve(expected);

        let mut perms = Permutations::new(length);
        while perms.advance().is_some() {
            let ordinal = index.len() as u32;
            let key = PermutationKey::from_slice(perms.current());
            if index.insert(key, ordinal).is_some() {
                return Err(PlanError::EnumerationMismatch {
                    length,
                    expected,
                    actual: ordinal as usize,
                });
            }
            enumerated.extend_from_slice(perms.current());
        }

        if index.len() != expected {
            return Err(PlanError::EnumerationMismatch {
                length,
                expected,
                actual: index.len(),
            });
        }
        Ok((enumerated, index))
    }

    /// Greedy breadth-first claiming; returns claims in claim order.
    fn claim(
        &self,
        enumerated: &[u8],
        index: &FxHashMap<PermutationKey, u32>,
    ) -> Result<Vec<Claim>, PlanError> {
        let length = self.length;
        let total = index.len();

        let mut pool = FixedBitSet::with_capacity(total);
        pool.insert_range(1..total);
        let mut remaining = total - 1;

        let mut claims = Vec::with_capacity(total);
        claims.push(Claim {
            ordinal: 0,
            owner: NO_PARENT,
            first_child: 0,
            child_count: 0,
            added: [Edge::VOID; 2],
            removed: [Edge::VOID; 2],
        });

        let mut candidates: Vec<u32> = Vec::with_capacity(length * length);
        let mut reversed = vec![0u8; length];
        let mut cursor = 0;

        while cursor < claims.len() && remaining > 0 {
            let owner_ordinal = claims[cursor].ordinal as usize;
            let owner = &enumerated[owner_ordinal * length..(owner_ordinal + 1) * length];
            let owner_edges = EdgeSet::of(owner);

            candidates.clear();
            for i in 0..length {
                for j in i + 1..length {
                    reversed.copy_from_slice(owner);
                    reversed[i..=j].reverse();
                    let key = PermutationKey::from_slice(&reversed);
                    let ordinal = *index.get(&key).ok_or(PlanError::EnumerationMismatch {
                        length,
                        expected: total,
                        actual: index.len(),
                    })?;
                    if pool.contains(ordinal as usize) {
                        candidates.push(ordinal);
                    }
                }
            }
            candidates.sort_unstable();

            let first_child = claims.len() as u32;
            for &ordinal in &candidates {
                let ordinal_us = ordinal as usize;
                let candidate = &enumerated[ordinal_us * length..(ordinal_us + 1) * length];
                let diff = owner_edges.difference(&EdgeSet::of(candidate));
                let (added, removed) = check_move(owner_ordinal, ordinal_us, &diff)?;

                pool.set(ordinal_us, false);
                remaining -= 1;
                claims.push(Claim {
                    ordinal,
                    owner: cursor as u32,
                    first_child: 0,
                    child_count: 0,
                    added,
                    removed,
                });
            }
            claims[cursor].first_child = first_child;
            claims[cursor].child_count = claims.len() as u32 - first_child;
            cursor += 1;
        }

        if remaining > 0 {
            return Err(PlanError::UnclaimedPermutations { length, remaining });
        }
        Ok(claims)
    }

    /// Re-lays claims in depth-first pre-order.
    fn lay_out(&self, enumerated: &[u8], claims: &[Claim]) -> WindowPlan {
        struct Frame {
            claim: usize,
            next_child: u32,
            node: usize,
        }

        let length = self.length;
        let mut nodes = Vec::with_capacity(claims.len());
        let mut permutations = Vec::with_capacity(claims.len() * length);
        let mut max_depth = 0;

        let push = |nodes: &mut Vec<PlanNode>, permutations: &mut Vec<u8>, claim: &Claim, node| {
            let ordinal = claim.ordinal as usize;
            permutations.extend_from_slice(&enumerated[ordinal * length..(ordinal + 1) * length]);
            nodes.push(node);
            nodes.len() - 1
        };

        let root = push(&mut nodes, &mut permutations, &claims[0], PlanNode::root());
        let mut stack = vec![Frame {
            claim: 0,
            next_child: 0,
            node: root,
        }];

        while let Some(top) = stack.last_mut() {
            let owner = &claims[top.claim];
            if top.next_child < owner.child_count {
                let claim_index = (owner.first_child + top.next_child) as usize;
                top.next_child += 1;
                let parent = top.node;
                let depth = stack.len();
                max_depth = max_depth.max(depth);

                let claim = &claims[claim_index];
                debug_assert_eq!(claim.owner as usize, stack[stack.len() - 1].claim);
                let node = PlanNode {
                    parent: parent as u32,
                    subtree_end: 0,
                    depth: depth as u8,
                    added: claim.added,
                    removed: claim.removed,
                };
                let node = push(&mut nodes, &mut permutations, claim, node);
                stack.push(Frame {
                    claim: claim_index,
                    next_child: 0,
                    node,
                });
            } else {
                nodes[top.node].subtree_end = nodes.len() as u32;
                stack.pop();
            }
        }

        WindowPlan {
            length,
            nodes,
            permutations,
            max_depth,
        }
    }
}

/// Validates an owner→candidate edge difference and packs it.
fn check_move(
    owner: usize,
    candidate: usize,
    diff: &EdgeSetDiff,
) -> Result<([Edge; 2], [Edge; 2]), PlanError> {
    if diff.is_empty() {
        return Err(PlanError::IdenticalEdgeSets { owner, candidate });
    }
    if diff.added.len() > 2 || diff.removed.len() > 2 {
        return Err(PlanError::EdgeDiffTooLarge {
            owner,
            candidate,
            added: diff.added.len(),
            removed: diff.removed.len(),
        });
    }
    let mut added = [Edge::VOID; 2];
    let mut removed = [Edge::VOID; 2];
    added[..diff.added.len()].copy_from_slice(&diff.added);
    removed[..diff.removed.len()].copy_from_slice(&diff.removed);
    Ok((added, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn build(length: usize) -> WindowPlan {
        MoveTreeBuilder::new(length).unwrap().build().unwrap()
    }

    #[test]
    fn test_rejects_zero_length() {
        assert_eq!(
            MoveTreeBuilder::new(0).unwrap_err(),
            PlanError::InvalidLength {
                length: 0,
                max: MAX_WINDOW_LENGTH
            }
        );
    }

    #[test]
    fn test_rejects_oversized_length() {
        assert!(MoveTreeBuilder::new(MAX_WINDOW_LENGTH + 1).is_err());
    }

    #[test]
    fn test_single_slot_plan_is_root_only() {
        let plan = build(1);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.permutation(0), &[1]);
        assert_eq!(plan.max_depth(), 0);
        assert_eq!(plan.children(0).count(), 0);
    }

    #[test]
    fn test_two_slot_plan() {
        let plan = build(2);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.permutation(1), &[2, 1]);
        assert_eq!(plan.parent(1), Some(0));
        let node = plan.node(1);
        assert_eq!(node.removed(), &[Edge::new(0, 1), Edge::new(2, 3)]);
        assert_eq!(node.added(), &[Edge::new(0, 2), Edge::new(1, 3)]);
    }

    #[test]
    fn test_node_count_is_factorial() {
        for length in 1..=7 {
            assert_eq!(Some(build(length).len()), factorial(length), "length {length}");
        }
    }

    #[test]
    fn test_root_is_identity_and_unparented() {
        let plan = build(5);
        assert_eq!(plan.permutation(0), &[1, 2, 3, 4, 5]);
        assert!(plan.root().is_root());
        assert_eq!(plan.root().subtree_end(), plan.len());
    }

    #[test]
    fn test_every_permutation_once() {
        let plan = build(6);
        let unique: HashSet<Vec<u8>> = (0..plan.len())
            .map(|i| plan.permutation(i).to_vec())
            .collect();
        assert_eq!(unique.len(), plan.len());
    }

    #[test]
    fn test_parents_precede_children() {
        let plan = build(6);
        for (i, node, _) in plan.iter().skip(1) {
            let parent = node.parent().expect("non-root has a parent");
            assert!(parent < i);
            assert_eq!(node.depth(), plan.node(parent).depth() + 1);
            assert!(i < plan.node(parent).subtree_end());
        }
    }

    #[test]
    fn test_recorded_moves_reconstruct_child_edges() {
        for length in 2..=6 {
            let plan = build(length);
            for (i, node, perm) in plan.iter().skip(1) {
                let parent = node.parent().unwrap();
                let parent_edges = EdgeSet::of(plan.permutation(parent));
                let rebuilt = parent_edges.apply(node.added(), node.removed());
                assert_eq!(rebuilt, EdgeSet::of(perm), "length {length}, node {i}");
            }
        }
    }

    #[test]
    fn test_every_move_swaps_exactly_two_edges() {
        let plan = build(6);
        for (_, node, _) in plan.iter().skip(1) {
            assert!(node.added().iter().all(|e| !e.is_void()));
            assert!(node.removed().iter().all(|e| !e.is_void()));
        }
    }

    #[test]
    fn test_children_cover_subtrees() {
        let plan = build(5);
        let mut seen = vec![false; plan.len()];
        seen[0] = true;
        let mut stack = vec![0];
        while let Some(i) = stack.pop() {
            for child in plan.children(i) {
                assert_eq!(plan.parent(child), Some(i));
                assert!(!seen[child]);
                seen[child] = true;
                stack.push(child);
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_depth_bounded_by_reversal_distance() {
        // Any ordering is at most L - 1 reversals from the identity.
        for length in 2..=7 {
            assert!(build(length).max_depth() < length);
        }
    }

    /// Literal pool scan: every owner tests every unassigned ordering.
    fn naive_parents(length: usize) -> Vec<(Vec<u8>, Option<Vec<u8>>)> {
        let all: Vec<Vec<u8>> = Permutations::new(length).collect();
        let edges: Vec<EdgeSet> = all.iter().map(|p| EdgeSet::of(p)).collect();
        let mut pool: Vec<usize> = (1..all.len()).collect();
        let mut claimed = vec![0usize];
        let mut parent = vec![None; all.len()];
        let mut cursor = 0;
        while cursor < claimed.len() && !pool.is_empty() {
            let owner = claimed[cursor];
            pool.retain(|&c| {
                let diff = edges[owner].difference(&edges[c]);
                if diff.added.len() <= 2 && diff.removed.len() <= 2 {
                    parent[c] = Some(owner);
                    claimed.push(c);
                    false
                } else {
                    true
                }
            });
            cursor += 1;
        }
        assert!(pool.is_empty());
        (0..all.len())
            .map(|i| (all[i].clone(), parent[i].map(|p| all[p].clone())))
            .collect()
    }

    #[test]
    fn test_matches_literal_pool_scan() {
        for length in 2..=6 {
            let plan = build(length);
            let mut expected = naive_parents(length);
            let mut actual: Vec<(Vec<u8>, Option<Vec<u8>>)> = plan
                .iter()
                .map(|(_, node, perm)| {
                    (perm.to_vec(), node.parent().map(|p| plan.permutation(p).to_vec()))
                })
                .collect();
            expected.sort();
            actual.sort();
            assert_eq!(actual, expected, "length {length}");
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        assert_eq!(build(5), build(5));
    }

    #[test]
    fn test_check_move_rejects_identical() {
        let diff = EdgeSetDiff::default();
        assert_eq!(
            check_move(0, 3, &diff),
            Err(PlanError::IdenticalEdgeSets {
                owner: 0,
                candidate: 3
            })
        );
    }

    #[test]
    fn test_check_move_rejects_three_opt() {
        let owner = EdgeSet::of(&[1, 2, 3, 4, 5]);
        let candidate = EdgeSet::of(&[3, 1, 5, 2, 4]);
        let diff = owner.difference(&candidate);
        assert!(matches!(
            check_move(0, 1, &diff),
            Err(PlanError::EdgeDiffTooLarge { .. })
        ));
    }
}
