//! Brute-force reference evaluation.

use crate::optimizer::DistanceOracle;
use crate::permutation::Permutations;

/// Best ordering found by full enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExhaustiveResult {
    /// Most negative sub-path delta, `0` if the canonical order is optimal.
    pub best_delta: i64,
    /// Winning ordering, `None` if the canonical order is optimal.
    pub best_permutation: Option<Vec<u8>>,
    /// Sub-path length of the canonical order.
    pub canonical_length: i64,
}

/// Recomputes the full sub-path length of every ordering.
///
/// O(L! · L) distance lookups. Independent of any plan, so it serves as a
/// cross-check for [`IncrementalEvaluator`](super::IncrementalEvaluator).
pub struct ExhaustiveEvaluator;

impl ExhaustiveEvaluator {
    /// Length of the sub-path `values[0] → values[perm[0]] → … → values[L + 1]`.
    pub fn path_length<D>(values: &[usize], perm: &[u8], distance: &D) -> i64
    where
        D: DistanceOracle + ?Sized,
    {
        let after = values[values.len() - 1];
        let mut previous = values[0];
        let mut total = 0;
        for &content in perm {
            let node = values[content as usize];
            total += distance.distance(previous, node);
            previous = node;
        }
        total + distance.distance(previous, after)
    }

    /// Scans all orderings of the `values.len() - 2` interior slots.
    ///
    /// # Panics
    ///
    /// Panics if `values` has fewer than two entries.
    pub fn best<D>(values: &[usize], distance: &D) -> ExhaustiveResult
    where
        D: DistanceOracle + ?Sized,
    {
        assert!(values.len() >= 2, "need both anchors");
        let length = values.len() - 2;
        let canonical = crate::permutation::identity(length);
        let canonical_length = Self::path_length(values, &canonical, distance);

        let mut best_delta = 0;
        let mut best_permutation = None;
        let mut perms = Permutations::new(length);
        while perms.advance().is_some() {
            let delta = Self::path_length(values, perms.current(), distance) - canonical_length;
            if delta < best_delta {
                best_delta = delta;
                best_permutation = Some(perms.current().to_vec());
            }
        }

        ExhaustiveResult {
            best_delta,
            best_permutation,
            canonical_length,
        }
    }
}
