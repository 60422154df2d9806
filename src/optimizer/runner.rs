//! Window read-out, evaluation and write-back on a cyclic tour.

use std::sync::{Arc, OnceLock};

use tracing::trace;

use super::config::OptimizerConfig;
use super::distance::DistanceOracle;
use crate::error::WindowError;
use crate::eval::{EvaluationContext, IncrementalEvaluator};
use crate::plan::{PlanCache, WindowPlan};

/// Optimally reorders a fixed-length window of a cyclic tour.
///
/// The window is the `L` positions after `anchor` (wrapping around the
/// tour); the node at `anchor` and the node right after the window stay in
/// place. Every one of the `L!` interior orderings is compared through the
/// shared [`WindowPlan`] for `L`, fetched lazily from
/// [`PlanCache::global`].
///
/// The optimizer is `Sync`: many threads may call [`apply`](Self::apply)
/// on the same instance, each with its own tour window.
///
/// # Examples
///
/// ```
/// use u_windowopt::optimizer::{DistanceMatrix, OptimizerConfig, SubPathOptimizer};
///
/// // Nodes on a line; the window after node 0 holds 3, 1, 2.
/// let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_points(&points);
/// let mut tour = vec![0, 3, 1, 2, 4, 5];
///
/// let optimizer = SubPathOptimizer::new(OptimizerConfig::new(3)).unwrap();
/// let delta = optimizer.apply(&mut tour, 0, &dm).unwrap();
///
/// assert_eq!(delta, -4);
/// assert_eq!(tour, vec![0, 1, 2, 3, 4, 5]);
/// ```
#[derive(Debug)]
pub struct SubPathOptimizer {
    config: OptimizerConfig,
    plan: OnceLock<Arc<WindowPlan>>,
}

impl SubPathOptimizer {
    /// Creates an optimizer after validating `config`.
    pub fn new(config: OptimizerConfig) -> Result<Self, WindowError> {
        config.validate().map_err(WindowError::InvalidConfig)?;
        Ok(Self {
            config,
            plan: OnceLock::new(),
        })
    }

    /// Creates an optimizer with default settings for `window_length`.
    pub fn with_window_length(window_length: usize) -> Result<Self, WindowError> {
        Self::new(OptimizerConfig::new(window_length))
    }

    /// Window length `L` handled by this instance.
    pub fn window_length(&self) -> usize {
        self.config.window_length
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// The plan for this window length, built on first use.
    pub fn plan(&self) -> Result<&Arc<WindowPlan>, WindowError> {
        if let Some(plan) = self.plan.get() {
            return Ok(plan);
        }
        let plan = PlanCache::global().get_or_build(self.window_length())?;
        Ok(self.plan.get_or_init(|| plan))
    }

    /// Reorders the window after `anchor` if that shortens the sub-path.
    ///
    /// Returns the change in tour length: negative when the tour was
    /// rewritten, `0` when the current order is already the best one.
    pub fn apply<D>(&self, tour: &mut [usize], anchor: usize, distance: &D) -> Result<i64, WindowError>
    where
        D: DistanceOracle + ?Sized,
    {
        let mut ctx = EvaluationContext::new(self.window_length());
        self.apply_with_context(&mut ctx, tour, anchor, distance)
    }

    /// Like [`apply`](Self::apply), reusing a caller-owned context.
    pub fn apply_with_context<D>(
        &self,
        ctx: &mut EvaluationContext,
        tour: &mut [usize],
        anchor: usize,
        distance: &D,
    ) -> Result<i64, WindowError>
    where
        D: DistanceOracle + ?Sized,
    {
        let length = self.window_length();
        let tour_len = tour.len();
        if tour_len < length + 2 {
            return Err(WindowError::TourTooShort {
                tour_len,
                window_length: length,
            });
        }
        if anchor >= tour_len {
            return Err(WindowError::AnchorOutOfBounds { anchor, tour_len });
        }
        if ctx.length() != length {
            return Err(WindowError::ContextMismatch {
                context: ctx.length(),
                plan: length,
            });
        }

        let plan = self.plan()?;
        let mut values = [0usize; crate::permutation::MAX_WINDOW_LENGTH + 2];
        let values = &mut values[..length + 2];
        for (slot, value) in values.iter_mut().enumerate() {
            *value = tour[(anchor + slot) % tour_len];
        }
        ctx.load(values, distance)?;

        let evaluation = IncrementalEvaluator::evaluate(plan, ctx)?;
        if !evaluation.is_improving() {
            return Ok(0);
        }

        for (position, assigned) in ctx.assignment().iter().enumerate() {
            let at = (anchor + 1 + position) % tour_len;
            match assigned {
                Some(node) => tour[at] = *node,
                None if !self.config.skip_unchanged => tour[at] = ctx.value(position + 1),
                None => {}
            }
        }
        trace!(
            anchor,
            delta = evaluation.best_delta,
            node = ?evaluation.best_node,
            "window reordered"
        );
        Ok(evaluation.best_delta)
    }
}
