//! Sub-path window optimizer for cyclic tours.
//!
//! [`SubPathOptimizer::apply`] reads the window after an anchor position,
//! compares every ordering of its `L` interior nodes against the current
//! one, and writes back the shortest if it improves. The tour, the choice of
//! windows and the search loop around it belong to the caller.
//!
//! # Key Types
//!
//! - [`SubPathOptimizer`]: the facade
//! - [`OptimizerConfig`]: window length and write-back settings
//! - [`DistanceOracle`], [`DistanceMatrix`]: pairwise distance sources

mod config;
mod distance;
mod runner;

pub use config::OptimizerConfig;
pub use distance::{DistanceMatrix, DistanceOracle};
pub use runner::SubPathOptimizer;
