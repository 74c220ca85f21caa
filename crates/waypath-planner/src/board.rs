//! The [`Board`] — grid, waypoint sequence and the commands that edit them.
//!
//! A host (renderer, terminal front end, test) turns user input into
//! [`Command`]s and forwards every [`CellStateChanged`] it receives to its
//! display. All commands take `&mut self`, so no edit can overlap a running
//! route.

use waypath_core::{
    CellState, CellStateChanged, Coord, Grid, GridConfig, GridError, ProgressSink, Role,
};
use waypath_paths::{CancelToken, PathSearch};

use crate::coordinator::{RouteCoordinator, Waypoint};
use crate::error::CommandError;
use crate::route::Route;

/// A discrete edit or action requested by the input collaborator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    PlaceWaypoint(Coord),
    PlaceBarrier(Coord),
    ResetCell(Coord),
    ClearBoard,
    /// Lock the stops and mark the last one as the end.
    FinalizeStops,
    RunRoute,
}

/// What a successful [`Command`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A waypoint was added.
    Waypoint(Waypoint),
    Barrier(Coord),
    /// A cell was reset; carries the role it had before.
    Reset(Role),
    Cleared,
    /// Stops were finalized; carries the end coordinate.
    Finalized(Coord),
    Routed(Route),
}

/// Grid plus waypoint sequence, driven by [`Command`]s.
#[derive(Debug)]
pub struct Board {
    config: GridConfig,
    grid: Grid,
    coordinator: RouteCoordinator,
    cancel: CancelToken,
    route: Option<Route>,
}

impl Board {
    /// An empty board sized by `config`.
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            grid: Grid::from_config(&config),
            coordinator: RouteCoordinator::new(),
            cancel: CancelToken::new(),
            route: None,
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn coordinator(&self) -> &RouteCoordinator {
        &self.coordinator
    }

    /// The route from the last successful run, cleared by any edit.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Token polled by running searches. Clone it to cancel from a sink or
    /// another thread; it is re-armed after every run.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Validate and execute `command`, reporting cell changes to `sink`.
    pub fn apply<S>(&mut self, command: Command, sink: &mut S) -> Result<Outcome, CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        log::debug!("board command {command:?}");
        match command {
            Command::PlaceWaypoint(c) => self.place_waypoint(c, sink).map(Outcome::Waypoint),
            Command::PlaceBarrier(c) => self.place_barrier(c, sink).map(|()| Outcome::Barrier(c)),
            Command::ResetCell(c) => self.reset_cell(c, sink).map(Outcome::Reset),
            Command::ClearBoard => {
                self.clear(sink);
                Ok(Outcome::Cleared)
            }
            Command::FinalizeStops => self.finalize_stops(sink).map(Outcome::Finalized),
            Command::RunRoute => self.run_route(sink).map(Outcome::Routed),
        }
    }

    /// Append a waypoint at `c` with the next ordinal.
    pub fn place_waypoint<S>(&mut self, c: Coord, sink: &mut S) -> Result<Waypoint, CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        match self.grid.role(c) {
            None => return Err(GridError::OutOfBounds(c).into()),
            Some(Role::Barrier) => return Err(GridError::WaypointOnBarrier(c).into()),
            Some(_) => {}
        }
        let wp = self.coordinator.append_waypoint(c)?;
        self.grid.set_role(c, wp.role())?;
        self.route = None;
        sink.cell_changed(CellStateChanged::new(c, CellState::from_role(wp.role())));
        Ok(wp)
    }

    /// Turn the cell at `c` into a barrier.
    pub fn place_barrier<S>(&mut self, c: Coord, sink: &mut S) -> Result<(), CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        self.grid.set_barrier(c, true)?;
        self.route = None;
        sink.cell_changed(CellStateChanged::new(c, CellState::Barrier));
        Ok(())
    }

    /// Restore the cell at `c` to empty. A waypoint there leaves the
    /// sequence; the remaining stops keep their ordinals.
    pub fn reset_cell<S>(&mut self, c: Coord, sink: &mut S) -> Result<Role, CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        let previous = self.grid.reset(c)?;
        if previous.is_waypoint() {
            self.coordinator.remove_waypoint(c);
        }
        if previous != Role::Empty {
            self.route = None;
        }
        sink.cell_changed(CellStateChanged::new(c, CellState::Empty));
        Ok(previous)
    }

    /// Recreate every cell and forget all stops and routes.
    pub fn clear<S>(&mut self, sink: &mut S)
    where
        S: ProgressSink + ?Sized,
    {
        self.grid = Grid::from_config(&self.config);
        self.coordinator.clear();
        self.route = None;
        self.cancel.reset();
        for c in self.grid.bounds() {
            sink.cell_changed(CellStateChanged::new(c, CellState::Empty));
        }
    }

    /// Lock the stops; the last one becomes the end.
    pub fn finalize_stops<S>(&mut self, sink: &mut S) -> Result<Coord, CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        let end = self.coordinator.finalize()?;
        self.grid.set_role(end, Role::END)?;
        sink.cell_changed(CellStateChanged::new(end, CellState::End));
        Ok(end)
    }

    /// Search every leg and, on success, paint the route.
    ///
    /// Search progress goes to `sink` as it happens; [`CellState::Path`]
    /// events follow only once every leg has succeeded, and only for cells
    /// that are not waypoints.
    pub fn run_route<S>(&mut self, sink: &mut S) -> Result<Route, CommandError>
    where
        S: ProgressSink + ?Sized,
    {
        self.route = None;
        let searcher = PathSearch::with_cancel(self.cancel.clone());
        let result = self.coordinator.run_route_with(&searcher, &self.grid, sink);
        self.cancel.reset();
        let route = result?;

        for &c in route.path() {
            if self.grid.role(c) == Some(Role::Empty) {
                sink.cell_changed(CellStateChanged::new(c, CellState::Path));
            }
        }
        self.route = Some(route.clone());
        Ok(route)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
