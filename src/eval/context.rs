//! Per-call evaluation state.

use crate::error::WindowError;
use crate::optimizer::DistanceOracle;
use crate::permutation::Edge;

/// Node values and distance cache for one window, plus best-so-far state.
///
/// Slot `0` holds the before-anchor, slots `1..=L` the interior nodes in
/// their current order, slot `L + 1` the after-anchor. Distances are cached
/// for every pair of slots that can become adjacent under some ordering.
///
/// One context serves one call at a time; give each thread its own.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    length: usize,
    stride: usize,
    values: Vec<usize>,
    /// Upper triangle of the slot distance table, `low * stride + high`.
    distances: Vec<i64>,
    /// Running delta per tree depth during traversal.
    pub(crate) depth_deltas: Vec<i64>,
    best_delta: i64,
    best_node: Option<usize>,
    assignment: Vec<Option<usize>>,
}

impl EvaluationContext {
    /// Creates an empty context for windows of `length` interior slots.
    pub fn new(length: usize) -> Self {
        let stride = length + 2;
        Self {
            length,
            stride,
            values: vec![0; stride],
            distances: vec![0; stride * stride],
            depth_deltas: vec![0; length.max(1)],
            best_delta: 0,
            best_node: None,
            assignment: vec![None; length],
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Loads the `L + 2` slot values and caches their pairwise distances.
    ///
    /// Clears any best-so-far state from a previous call.
    pub fn load<D>(&mut self, values: &[usize], distance: &D) -> Result<(), WindowError>
    where
        D: DistanceOracle + ?Sized,
    {
        if values.len() != self.stride {
            return Err(WindowError::SlotCountMismatch {
                expected: self.stride,
                actual: values.len(),
            });
        }
        self.values.copy_from_slice(values);

        let after = self.stride - 1;
        for low in 0..self.stride {
            for high in low + 1..self.stride {
                // The anchors are never adjacent to each other.
                if low == 0 && high == after {
                    continue;
                }
                self.distances[low * self.stride + high] =
                    distance.distance(values[low], values[high]);
            }
        }
        // Edge::VOID joins slot 0 to itself and must stay free.
        self.distances[0] = 0;

        self.reset();
        Ok(())
    }

    /// Node value at `slot`.
    pub fn value(&self, slot: usize) -> usize {
        self.values[slot]
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Cached length of `edge`.
    #[inline]
    pub fn distance(&self, edge: Edge) -> i64 {
        self.distances[edge.low() as usize * self.stride + edge.high() as usize]
    }

    /// Best delta seen so far (`0` if nothing improved).
    pub fn best_delta(&self) -> i64 {
        self.best_delta
    }

    /// Plan node achieving [`best_delta`](Self::best_delta), if any.
    pub fn best_node(&self) -> Option<usize> {
        self.best_node
    }

    /// Per interior position: the node to write, or `None` to leave it.
    pub fn assignment(&self) -> &[Option<usize>] {
        &self.assignment
    }

    pub(crate) fn reset(&mut self) {
        self.best_delta = 0;
        self.best_node = None;
        self.assignment.iter_mut().for_each(|a| *a = None);
    }

    pub(crate) fn ensure_depth(&mut self, max_depth: usize) {
        if self.depth_deltas.len() <= max_depth {
            self.depth_deltas.resize(max_depth + 1, 0);
        }
    }

    pub(crate) fn distance_table(&self) -> (&[i64], usize) {
        (&self.distances, self.stride)
    }

    /// Records the winning ordering and snapshots its assignment.
    pub(crate) fn record_best(&mut self, delta: i64, node: usize, permutation: &[u8]) {
        self.best_delta = delta;
        self.best_node = Some(node);
        for (position, (&content, slot)) in permutation
            .iter()
            .zip(self.assignment.iter_mut())
            .enumerate()
        {
            let content = content as usize;
            *slot = (content != position + 1).then(|| self.values[content]);
        }
    }
}
