//! Multi-leg route orchestration.

use std::collections::HashSet;

use waypath_core::{Coord, ProgressSink, Role};
use waypath_paths::{AstarPather, PathSearch};

use crate::error::{RouteError, RouteFailure};
use crate::route::Route;

/// A route stop with the ordinal it was given when placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub coord: Coord,
    /// `Some(n)` for ordered stops (0 is the start), `None` for the end
    /// marker assigned by [`RouteCoordinator::finalize`].
    pub ordinal: Option<u32>,
}

impl Waypoint {
    /// The grid role matching this waypoint.
    #[inline]
    pub const fn role(self) -> Role {
        Role::Waypoint(self.ordinal)
    }

    #[inline]
    pub const fn is_start(self) -> bool {
        matches!(self.ordinal, Some(0))
    }

    #[inline]
    pub const fn is_end(self) -> bool {
        self.ordinal.is_none()
    }
}

/// Owns the ordered waypoint sequence and runs one A* search per leg.
///
/// Ordinals are handed out from a counter and never recomputed, so removing
/// a stop leaves a gap in the numbering of the remaining ones.
#[derive(Debug, Clone, Default)]
pub struct RouteCoordinator {
    waypoints: Vec<Waypoint>,
    next_ordinal: u32,
    finalized: bool,
}

impl RouteCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current sequence in visiting order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.waypoints.iter().any(|w| w.coord == c)
    }

    /// Whether [`finalize`](Self::finalize) has locked the sequence.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Replace the whole sequence, numbering the stops `0..n`.
    ///
    /// The previous sequence is kept if the new one is rejected.
    pub fn set_waypoints<I>(&mut self, coords: I) -> Result<(), RouteError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let coords: Vec<Coord> = coords.into_iter().collect();
        let mut seen = HashSet::with_capacity(coords.len());
        if let Some(&dup) = coords.iter().find(|&&c| !seen.insert(c)) {
            return Err(RouteError::DuplicateWaypoint(dup));
        }
        if coords.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(coords.len()));
        }

        self.waypoints = coords
            .into_iter()
            .zip(0u32..)
            .map(|(coord, n)| Waypoint {
                coord,
                ordinal: Some(n),
            })
            .collect();
        self.next_ordinal = self.waypoints.len() as u32;
        self.finalized = false;
        Ok(())
    }

    /// Add a stop at the end of the sequence with the next ordinal.
    pub fn append_waypoint(&mut self, coord: Coord) -> Result<Waypoint, RouteError> {
        if self.finalized {
            return Err(RouteError::StopsFinalized);
        }
        if self.contains(coord) {
            return Err(RouteError::DuplicateWaypoint(coord));
        }
        let wp = Waypoint {
            coord,
            ordinal: Some(self.next_ordinal),
        };
        self.next_ordinal += 1;
        self.waypoints.push(wp);
        Ok(wp)
    }

    /// Remove the stop at `coord`, if any. Other ordinals are untouched.
    pub fn remove_waypoint(&mut self, coord: Coord) -> Option<Waypoint> {
        let i = self.waypoints.iter().position(|w| w.coord == coord)?;
        Some(self.waypoints.remove(i))
    }

    /// Lock the sequence and mark its last stop as the end.
    ///
    /// Calling it again on a finalized sequence returns the same end.
    pub fn finalize(&mut self) -> Result<Coord, RouteError> {
        if self.waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(self.waypoints.len()));
        }
        self.finalized = true;
        let last = self
            .waypoints
            .last_mut()
            .ok_or(RouteError::InsufficientWaypoints(0))?;
        last.ordinal = None;
        Ok(last.coord)
    }

    /// Forget every stop and start numbering from 0 again.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.next_ordinal = 0;
        self.finalized = false;
    }

    /// Search every leg in order and stitch the results together.
    ///
    /// The first failing leg aborts the run; no partial route is returned.
    pub fn run_route<P, S>(&self, pather: &P, sink: &mut S) -> Result<Route, RouteError>
    where
        P: AstarPather + ?Sized,
        S: ProgressSink + ?Sized,
    {
        self.run_route_with(&PathSearch::new(), pather, sink)
    }

    /// Like [`run_route`](Self::run_route) with a caller-supplied search,
    /// typically one carrying a cancellation token.
    pub fn run_route_with<P, S>(
        &self,
        searcher: &PathSearch,
        pather: &P,
        sink: &mut S,
    ) -> Result<Route, RouteError>
    where
        P: AstarPather + ?Sized,
        S: ProgressSink + ?Sized,
    {
        if self.waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(self.waypoints.len()));
        }

        let mut route = Route::new();
        for (leg_index, pair) in self.waypoints.windows(2).enumerate() {
            let (from, to) = (pair[0].coord, pair[1].coord);
            log::debug!("leg {leg_index}: {from} -> {to}");
            let leg = searcher
                .search(pather, from, to, sink)
                .map_err(|cause| {
                    log::warn!("leg {leg_index} ({from} -> {to}) failed: {cause}");
                    RouteFailure { leg_index, cause }
                })?;
            route.push_leg(leg);
        }

        log::info!(
            "route through {} waypoints: {} steps",
            self.waypoints.len(),
            route.steps()
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath_core::{CellState, CellStateChanged, Grid};
    use waypath_paths::{CancelToken, SearchFailure, bfs_distance};

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn enclose(grid: &mut Grid, target: Coord) {
        for n in target.orthogonal() {
            if grid.contains(n) {
                grid.set_barrier(n, true).unwrap();
            }
        }
    }

    #[test]
    fn append_assigns_increasing_ordinals() {
        let mut rc = RouteCoordinator::new();
        assert_eq!(rc.append_waypoint(c(0, 0)).unwrap().ordinal, Some(0));
        assert_eq!(rc.append_waypoint(c(1, 1)).unwrap().ordinal, Some(1));
        assert_eq!(rc.append_waypoint(c(2, 2)).unwrap().ordinal, Some(2));
        assert!(rc.waypoints()[0].is_start());
    }

    #[test]
    fn append_rejects_duplicates() {
        let mut rc = RouteCoordinator::new();
        rc.append_waypoint(c(0, 0)).unwrap();
        assert_eq!(
            rc.append_waypoint(c(0, 0)),
            Err(RouteError::DuplicateWaypoint(c(0, 0)))
        );
        assert_eq!(rc.len(), 1);
    }

    #[test]
    fn removal_leaves_ordinal_gaps() {
        let mut rc = RouteCoordinator::new();
        for col in 0..4 {
            rc.append_waypoint(c(0, col)).unwrap();
        }
        let removed = rc.remove_waypoint(c(0, 1)).unwrap();
        assert_eq!(removed.ordinal, Some(1));
        assert_eq!(rc.remove_waypoint(c(5, 5)), None);

        let ordinals: Vec<_> = rc.waypoints().iter().map(|w| w.ordinal).collect();
        assert_eq!(ordinals, vec![Some(0), Some(2), Some(3)]);
        // New stops keep counting from where numbering left off.
        assert_eq!(rc.append_waypoint(c(0, 1)).unwrap().ordinal, Some(4));
    }

    #[test]
    fn set_waypoints_validates() {
        let mut rc = RouteCoordinator::new();
        assert_eq!(
            rc.set_waypoints([c(0, 0)]),
            Err(RouteError::InsufficientWaypoints(1))
        );
        assert_eq!(
            rc.set_waypoints([c(0, 0), c(1, 1), c(0, 0)]),
            Err(RouteError::DuplicateWaypoint(c(0, 0)))
        );
        rc.set_waypoints([c(0, 0), c(2, 2)]).unwrap();
        assert_eq!(rc.len(), 2);

        // A rejected replacement keeps the previous sequence.
        assert!(rc.set_waypoints(Vec::<Coord>::new()).is_err());
        assert_eq!(rc.len(), 2);
        assert_eq!(rc.append_waypoint(c(3, 3)).unwrap().ordinal, Some(2));
    }

    #[test]
    fn finalize_marks_end_and_locks() {
        let mut rc = RouteCoordinator::new();
        rc.append_waypoint(c(0, 0)).unwrap();
        assert_eq!(rc.finalize(), Err(RouteError::InsufficientWaypoints(1)));
        rc.append_waypoint(c(3, 3)).unwrap();
        assert_eq!(rc.finalize(), Ok(c(3, 3)));
        assert!(rc.is_finalized());
        assert!(rc.waypoints()[1].is_end());
        assert_eq!(rc.waypoints()[1].role(), Role::END);
        assert_eq!(rc.append_waypoint(c(4, 4)), Err(RouteError::StopsFinalized));
        assert_eq!(rc.finalize(), Ok(c(3, 3)));

        rc.clear();
        assert!(!rc.is_finalized());
        assert_eq!(rc.append_waypoint(c(4, 4)).unwrap().ordinal, Some(0));
    }

    #[test]
    fn run_needs_two_waypoints() {
        let grid = Grid::new(3, 3);
        let mut rc = RouteCoordinator::new();
        rc.append_waypoint(c(0, 0)).unwrap();
        assert_eq!(
            rc.run_route(&grid, &mut ()),
            Err(RouteError::InsufficientWaypoints(1))
        );
    }

    #[test]
    fn concatenates_legs_sharing_junctions() {
        let grid = Grid::new(6, 6);
        let (a, b, cc) = (c(0, 0), c(0, 3), c(4, 3));
        assert_eq!(bfs_distance(&grid, a, b), Some(3));
        assert_eq!(bfs_distance(&grid, b, cc), Some(4));

        let mut rc = RouteCoordinator::new();
        rc.set_waypoints([a, b, cc]).unwrap();
        let route = rc.run_route(&grid, &mut ()).unwrap();

        assert_eq!(route.len(), 8);
        assert_eq!(route.path()[0], a);
        assert_eq!(route.path()[3], b);
        assert_eq!(route.path()[7], cc);
        assert_eq!(route.stops(), &[0, 3, 7]);
        assert_eq!(route.path().iter().filter(|&&p| p == b).count(), 1);
    }

    #[test]
    fn failing_leg_reports_index_and_no_route() {
        let mut grid = Grid::new(7, 7);
        let blocked = c(5, 5);
        enclose(&mut grid, blocked);

        let mut rc = RouteCoordinator::new();
        rc.set_waypoints([c(0, 0), c(0, 4), blocked, c(6, 0)]).unwrap();
        let mut events: Vec<CellStateChanged> = Vec::new();
        let err = rc.run_route(&grid, &mut events).unwrap_err();
        assert_eq!(
            err,
            RouteError::Leg(RouteFailure {
                leg_index: 1,
                cause: SearchFailure::Unreachable,
            })
        );
        assert!(events.iter().all(|ev| ev.new_role != CellState::Path));
    }

    #[test]
    fn waypoint_on_barrier_fails_in_either_direction() {
        let mut grid = Grid::new(3, 3);
        grid.set_barrier(c(0, 0), true).unwrap();
        let unreachable = RouteError::Leg(RouteFailure {
            leg_index: 0,
            cause: SearchFailure::Unreachable,
        });

        let mut rc = RouteCoordinator::new();
        rc.set_waypoints([c(0, 0), c(2, 2)]).unwrap();
        assert_eq!(rc.run_route(&grid, &mut ()), Err(unreachable));

        rc.set_waypoints([c(2, 2), c(0, 0)]).unwrap();
        assert_eq!(rc.run_route(&grid, &mut ()), Err(unreachable));
    }

    #[test]
    fn cancelled_route_reports_first_leg() {
        let grid = Grid::new(10, 10);
        let token = CancelToken::new();
        token.cancel();
        let mut rc = RouteCoordinator::new();
        rc.set_waypoints([c(0, 0), c(9, 9), c(0, 9)]).unwrap();
        let err = rc
            .run_route_with(&PathSearch::with_cancel(token), &grid, &mut ())
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::Leg(RouteFailure {
                leg_index: 0,
                cause: SearchFailure::Cancelled,
            })
        );
    }

    #[test]
    fn routes_are_deterministic() {
        let mut grid = Grid::new(12, 12);
        for row in 0..10 {
            grid.set_barrier(c(row, 6), true).unwrap();
        }
        let mut rc = RouteCoordinator::new();
        rc.set_waypoints([c(0, 0), c(0, 11), c(11, 0)]).unwrap();

        let mut first: Vec<CellStateChanged> = Vec::new();
        let mut second: Vec<CellStateChanged> = Vec::new();
        let a = rc.run_route(&grid, &mut first).unwrap();
        let b = rc.run_route(&grid, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
        assert_eq!(
            a.steps() as i32,
            bfs_distance(&grid, c(0, 0), c(0, 11)).unwrap()
                + bfs_distance(&grid, c(0, 11), c(11, 0)).unwrap()
        );
    }
}
