//! Move trees over all orderings of a window.
//!
//! A [`WindowPlan`] covers all `L!` orderings of a window of length `L`.
//! Each ordering except the canonical root hangs under a parent that is one
//! 2-opt move away, so its sub-path cost follows from the parent's by
//! adding two edge lengths and subtracting two. The plan depends only on
//! `L`, never on tour content, so it is built once and shared.
//!
//! # Key Types
//!
//! - [`MoveTreeBuilder`]: greedy breadth-first claiming over the
//!   Johnson–Trotter enumeration
//! - [`WindowPlan`], [`PlanNode`]: immutable pre-order arena, checked by
//!   [`WindowPlan::validate`]
//! - [`PlanCache`]: compute-once cache keyed by window length

mod builder;
mod cache;
mod types;
mod validate;

pub use builder::MoveTreeBuilder;
pub use cache::PlanCache;
pub use types::{Children, PlanNode, WindowPlan};
