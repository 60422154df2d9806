//! Permutation enumeration and edge bookkeeping for window orderings.
//!
//! A window of `L` interior slots is reordered by a permutation of the
//! content indices `1..=L`. Slot `0` (before-anchor) and slot `L + 1`
//! (after-anchor) never move, so every ordering induces the same number of
//! edges (`L + 1`), which makes edge-set differences well defined.
//!
//! # Key Types
//!
//! - [`Permutations`]: Steinhaus–Johnson–Trotter enumeration with Even's
//!   speedup; consecutive permutations differ by one adjacent swap
//! - [`PermutationKey`]: 4-bit packed `u64` key used for O(1) lookup
//! - [`Edge`], [`EdgeSet`], [`EdgeSetDiff`]: normalized edges of an ordering
//!   and their set difference
//!
//! # References
//!
//! - Johnson (1963), "Generation of permutations by adjacent transposition"
//! - Trotter (1962), "Algorithm 115: Perm"
//! - Even (1973), *Algorithmic Combinatorics*

mod edges;
mod enumerator;
mod key;

pub use edges::{Edge, EdgeSet, EdgeSetDiff};
pub use enumerator::Permutations;
pub use key::PermutationKey;

/// Largest window length supported by plan construction.
///
/// `10!` orderings is about 3.6 million plan nodes; one more step is
/// beyond practical memory and per-call time.
pub const MAX_WINDOW_LENGTH: usize = 10;

/// Returns `n!`, or `None` on overflow.
pub fn factorial(n: usize) -> Option<usize> {
    (2..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Returns the identity (canonical) permutation `1, 2, ..., length`.
pub fn identity(length: usize) -> Vec<u8> {
    (1..=length as u8).collect()
}
