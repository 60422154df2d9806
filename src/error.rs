//! Error types for plan construction and window optimization.

use thiserror::Error;

/// Failure while building a [`WindowPlan`](crate::plan::WindowPlan).
///
/// Apart from [`PlanError::InvalidLength`], every variant signals a broken
/// internal invariant. A plan that fails to build or to validate is never
/// cached or used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("window length must be in 1..={max}, got {length}")]
    InvalidLength { length: usize, max: usize },

    #[error("enumeration produced {actual} permutations for length {length}, expected {expected}")]
    EnumerationMismatch {
        length: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{remaining} permutations of length {length} could not be claimed by any owner")]
    UnclaimedPermutations { length: usize, remaining: usize },

    #[error("permutations #{owner} and #{candidate} induce identical edge sets")]
    IdenticalEdgeSets { owner: usize, candidate: usize },

    #[error("move from #{owner} to #{candidate} changes {added} added / {removed} removed edges (max 2)")]
    EdgeDiffTooLarge {
        owner: usize,
        candidate: usize,
        added: usize,
        removed: usize,
    },

    #[error("plan node #{node} is corrupt: {reason}")]
    CorruptNode { node: usize, reason: &'static str },

    #[error("plan for length {length} is malformed: {reason}")]
    MalformedPlan { length: usize, reason: &'static str },
}

/// Failure reported by [`SubPathOptimizer`](crate::optimizer::SubPathOptimizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("invalid optimizer config: {0}")]
    InvalidConfig(String),

    #[error("tour of {tour_len} nodes cannot hold a window of {window_length} plus two anchors")]
    TourTooShort {
        tour_len: usize,
        window_length: usize,
    },

    #[error("anchor index {anchor} out of bounds for tour of {tour_len} nodes")]
    AnchorOutOfBounds { anchor: usize, tour_len: usize },

    #[error("expected {expected} slot values, got {actual}")]
    SlotCountMismatch { expected: usize, actual: usize },

    #[error("evaluation context sized for window {context} used with window {plan}")]
    ContextMismatch { context: usize, plan: usize },

    #[error(transparent)]
    Plan(#[from] PlanError),
}
