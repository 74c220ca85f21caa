//! Error types for route coordination and board commands.

use thiserror::Error;
use waypath_core::{Coord, GridError};
use waypath_paths::SearchFailure;

/// The first leg of a route that could not be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("leg {leg_index} failed: {cause}")]
pub struct RouteFailure {
    /// Index of the failing leg; leg `i` runs from waypoint `i` to `i + 1`.
    pub leg_index: usize,
    #[source]
    pub cause: SearchFailure,
}

/// A rejected waypoint edit or a failed route run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("waypoint {0} is already part of the route")]
    DuplicateWaypoint(Coord),
    #[error("a route needs at least 2 waypoints, found {0}")]
    InsufficientWaypoints(usize),
    #[error("stops are finalized; clear the board to place more")]
    StopsFinalized,
    #[error(transparent)]
    Leg(#[from] RouteFailure),
}

/// Any failure surfaced by [`Board::apply`](crate::Board::apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Route(#[from] RouteError),
}

impl From<RouteFailure> for CommandError {
    fn from(failure: RouteFailure) -> Self {
        Self::Route(RouteError::Leg(failure))
    }
}
