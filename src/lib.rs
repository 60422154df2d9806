//! Exhaustive sub-path optimization for TSP tours.
//!
//! Given a cyclic tour and a window of `L` consecutive positions between two
//! fixed anchor nodes, finds the ordering of the window's nodes that
//! minimizes the `L + 1`-edge sub-path, and writes it back if it beats the
//! current one. All `L!` orderings are compared in O(L!) total work:
//!
//! - **Enumeration** ([`permutation`]): Steinhaus–Johnson–Trotter order,
//!   one adjacent swap between consecutive permutations.
//! - **Move tree** ([`plan`]): every ordering hangs under a parent one 2-opt
//!   move away, so its cost follows from the parent's by two added and two
//!   removed edges. Built once per `L` and shared read-only.
//! - **Incremental evaluation** ([`eval`]): one pre-order pass over the
//!   tree with cached slot distances.
//! - **Facade** ([`optimizer`]): window read-out, plan lookup, write-back.
//!
//! Practical window lengths are 2 to 10.
//!
//! # Examples
//!
//! ```
//! use u_windowopt::optimizer::{DistanceMatrix, SubPathOptimizer};
//!
//! let points = [(0.0, 0.0), (3.0, 0.0), (1.0, 0.0), (2.0, 0.0), (4.0, 0.0)];
//! let dm = DistanceMatrix::from_points(&points);
//! let mut tour = vec![0, 1, 2, 3, 4];
//!
//! let optimizer = SubPathOptimizer::with_window_length(3).unwrap();
//! assert_eq!(optimizer.apply(&mut tour, 0, &dm).unwrap(), -4);
//! assert_eq!(tour, vec![0, 2, 3, 1, 4]);
//! ```

pub mod error;
pub mod eval;
pub mod optimizer;
pub mod permutation;
pub mod plan;

pub use error::{PlanError, WindowError};
