//! Evaluation of window orderings.
//!
//! - [`EvaluationContext`]: per-call slot values, cached distances and
//!   best-so-far state
//! - [`IncrementalEvaluator`]: O(1)-per-ordering walk over a
//!   [`WindowPlan`](crate::plan::WindowPlan)
//! - [`ExhaustiveEvaluator`]: plan-free brute force, used as a reference

mod context;
mod evaluator;
mod exhaustive;

pub use context::EvaluationContext;
pub use evaluator::{Evaluation, IncrementalEvaluator};
pub use exhaustive::{ExhaustiveEvaluator, ExhaustiveResult};
