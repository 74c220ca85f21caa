//! Deterministic A* pathfinding over waypath grids.
//!
//! - **A\*** shortest-path search with first-in-first-out tie-breaking
//!   ([`PathSearch::search`], [`search`])
//! - **BFS** unit-cost distance maps ([`bfs_distances`])
//! - cooperative cancellation ([`CancelToken`])
//!
//! Searches run over anything implementing the pather traits; [`Grid`]
//! implements all of them with 4-connectivity, unit cost and a Manhattan
//! estimate.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | — |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! [`Grid`]: waypath_core::Grid

mod astar;
mod bfs;
mod cancel;
mod distance;
mod error;
mod frontier;
mod traits;

pub use astar::{PathSearch, UNREACHABLE, search};
pub use bfs::{bfs_distance, bfs_distances};
pub use cancel::CancelToken;
pub use distance::manhattan;
pub use error::SearchFailure;
pub use frontier::Frontier;
pub use traits::{AstarPather, Pather, WeightedPather};
