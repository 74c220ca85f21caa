//! **waypath-core** — grid model for waypoint route planning.
//!
//! This crate provides the types shared by the search and planner crates:
//! coordinates, cells and their roles, the board grid with on-demand
//! adjacency, and the cell-state events emitted to observers.

pub mod cell;
pub mod config;
pub mod error;
pub mod events;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Role};
pub use config::GridConfig;
pub use error::GridError;
pub use events::{CellState, CellStateChanged, FnSink, ProgressSink};
pub use geom::{Bounds, Coord};
pub use grid::Grid;
