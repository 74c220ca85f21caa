//! Errors raised when editing a [`Grid`](crate::Grid).

use thiserror::Error;

use crate::geom::Coord;

/// A rejected grid edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),
    #[error("cannot place a waypoint on the barrier at {0}")]
    WaypointOnBarrier(Coord),
    #[error("cannot turn the waypoint at {0} into a barrier")]
    CannotBarrierWaypoint(Coord),
    #[error("{cells} cells do not fill a {rows}x{cols} grid")]
    SizeMismatch { cells: usize, rows: i32, cols: i32 },
}
