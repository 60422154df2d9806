//! Incremental move-tree evaluation.
//!
//! # Algorithm
//!
//! Walk the plan in pre-order with `delta(root) = 0`. For every other node
//!
//! ```text
//! delta(node) = delta(parent) + d(added₁) + d(added₂) - d(removed₁) - d(removed₂)
//! ```
//!
//! Because the arena is in pre-order, the parent's delta is always the last
//! value written at `depth - 1`, so the walk is one forward pass with an
//! O(L) stack. The first node with the strictly smallest negative delta
//! wins.
//!
//! # Complexity
//!
//! O(L!) time, O(1) per ordering, O(L) extra space.

use super::context::EvaluationContext;
use crate::error::WindowError;
use crate::permutation::Edge;
use crate::plan::WindowPlan;

/// Outcome of one plan traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Most negative sub-path delta found, `0` if nothing improves.
    pub best_delta: i64,
    /// Plan node of the best ordering, `None` if the canonical order wins.
    pub best_node: Option<usize>,
    /// Number of orderings compared (the root excluded).
    pub compared: usize,
}

impl Evaluation {
    pub fn is_improving(&self) -> bool {
        self.best_delta < 0
    }
}

/// Runs a [`WindowPlan`] against a loaded [`EvaluationContext`].
pub struct IncrementalEvaluator;

impl IncrementalEvaluator {
    /// Traverses every ordering in `plan`, leaving the winner in `ctx`.
    pub fn evaluate(
        plan: &WindowPlan,
        ctx: &mut EvaluationContext,
    ) -> Result<Evaluation, WindowError> {
        if ctx.length() != plan.length() {
            return Err(WindowError::ContextMismatch {
                context: ctx.length(),
                plan: plan.length(),
            });
        }
        ctx.reset();
        ctx.ensure_depth(plan.max_depth());

        let mut best_delta = 0i64;
        let mut best_node = None;
        {
            let mut deltas = std::mem::take(&mut ctx.depth_deltas);
            let (table, stride) = ctx.distance_table();
            let cost = |edge: Edge| {
                table[edge.low() as usize * stride + edge.high() as usize]
            };

            deltas[0] = 0;
            for (index, node) in plan.nodes().iter().enumerate().skip(1) {
                let depth = node.depth();
                let [a1, a2] = *node.added();
                let [r1, r2] = *node.removed();
                let delta = deltas[depth - 1] + cost(a1) + cost(a2) - cost(r1) - cost(r2);
                deltas[depth] = delta;

                if delta < best_delta {
                    best_delta = delta;
                    best_node = Some(index);
                }
            }
            ctx.depth_deltas = deltas;
        }

        if let Some(node) = best_node {
            ctx.record_best(best_delta, node, plan.permutation(node));
        }

        Ok(Evaluation {
            best_delta,
            best_node,
            compared: plan.len().saturating_sub(1),
        })
    }
}
