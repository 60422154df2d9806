//! Normalized edges of a window ordering.
//!
//! Slot contents are numbered `0..=L+1`: `0` is the before-anchor, `1..=L`
//! the interior contents, `L + 1` the after-anchor. Since the after-anchor
//! has the largest id, plain integer order already sorts it last.

use smallvec::SmallVec;

/// Inline capacity for the `L + 1` edges of the largest supported window.
const EDGE_INLINE: usize = super::MAX_WINDOW_LENGTH + 1;

/// An undirected edge between two slot contents, stored with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    low: u8,
    high: u8,
}

impl Edge {
    /// Placeholder for a missing edge in a fixed-size move record.
    ///
    /// It joins the before-anchor to itself and always costs zero.
    pub const VOID: Edge = Edge { low: 0, high: 0 };

    pub fn new(a: u8, b: u8) -> Self {
        if a <= b {
            Edge { low: a, high: b }
        } else {
            Edge { low: b, high: a }
        }
    }

    pub fn low(self) -> u8 {
        self.low
    }

    pub fn high(self) -> u8 {
        self.high
    }

    pub fn is_void(self) -> bool {
        self == Edge::VOID
    }
}

/// Sorted edges induced by one ordering of the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSet {
    edges: SmallVec<[Edge; EDGE_INLINE]>,
}

/// Set difference between two [`EdgeSet`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSetDiff {
    /// Edges present in the target but not the source.
    pub added: SmallVec<[Edge; 4]>,
    /// Edges present in the source but not the target.
    pub removed: SmallVec<[Edge; 4]>,
}

impl EdgeSetDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl EdgeSet {
    /// Collects the `L + 1` edges of `perm`, anchored by slot `0` and
    /// slot `perm.len() + 1`.
    pub fn of(perm: &[u8]) -> Self {
        let after = perm.len() as u8 + 1;
        let mut edges: SmallVec<[Edge; EDGE_INLINE]> = SmallVec::with_capacity(perm.len() + 1);
        let mut previous = 0u8;
        for &content in perm {
            edges.push(Edge::new(previous, content));
            previous = content;
        }
        edges.push(Edge::new(previous, after));
        edges.sort_unstable();
        EdgeSet { edges }
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.binary_search(&edge).is_ok()
    }

    /// Merges the two sorted lists and reports what changes from `self`
    /// to `target`.
    pub fn difference(&self, target: &EdgeSet) -> EdgeSetDiff {
        let mut diff = EdgeSetDiff::default();
        let (a, b) = (&self.edges, &target.edges);
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    diff.removed.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    diff.added.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
            }
        }
        diff.removed.extend_from_slice(&a[i..]);
        diff.added.extend_from_slice(&b[j..]);
        diff
    }

    /// Returns a copy with `removed` taken out and `added` put in.
    ///
    /// Void edges are ignored on both sides.
    pub fn apply(&self, added: &[Edge], removed: &[Edge]) -> EdgeSet {
        let mut edges: SmallVec<[Edge; EDGE_INLINE]> = self
            .edges
            .iter()
            .copied()
            .filter(|e| !removed.contains(e))
            .collect();
        edges.extend(added.iter().copied().filter(|e| !e.is_void()));
        edges.sort_unstable();
        EdgeSet { edges }
    }
}
