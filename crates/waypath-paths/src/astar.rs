use std::collections::{HashMap, HashSet};

use waypath_core::{CellState, CellStateChanged, Coord, ProgressSink};

use crate::cancel::CancelToken;
use crate::error::SearchFailure;
use crate::frontier::Frontier;
use crate::traits::AstarPather;

/// Sentinel cost meaning "not reached yet".
pub const UNREACHABLE: i32 = i32::MAX;

/// A* shortest-path search between two cells.
///
/// A `PathSearch` holds no score state of its own: every call to
/// [`search`](Self::search) builds its maps from scratch and drops them on
/// return, so consecutive searches never influence each other. The optional
/// [`CancelToken`] is polled once per frontier pop.
#[derive(Clone, Debug, Default)]
pub struct PathSearch {
    cancel: Option<CancelToken>,
}

impl PathSearch {
    /// A search that can't be cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// A search that stops with [`SearchFailure::Cancelled`] once `token` is
    /// cancelled.
    pub fn with_cancel(token: CancelToken) -> Self {
        Self {
            cancel: Some(token),
        }
    }

    pub fn cancel_token(&self) -> Option<&CancelToken> {
        self.cancel.as_ref()
    }

    #[inline]
    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Compute the shortest path from `start` to `goal`.
    ///
    /// Returns the full path including both endpoints. Every cell entering
    /// the frontier is reported to `sink` as [`CellState::Open`], and every
    /// expanded cell other than `start` as [`CellState::Closed`]. Given the
    /// same pather state and endpoints, the path and the event sequence are
    /// identical from run to run.
    pub fn search<P, S>(
        &self,
        pather: &P,
        start: Coord,
        goal: Coord,
        sink: &mut S,
    ) -> Result<Vec<Coord>, SearchFailure>
    where
        P: AstarPather + ?Sized,
        S: ProgressSink + ?Sized,
    {
        if !pather.contains(start) || !pather.contains(goal) {
            log::debug!("astar {start} -> {goal}: endpoint outside the grid");
            return Err(SearchFailure::Unreachable);
        }
        if !pather.is_passable(start) || !pather.is_passable(goal) {
            log::debug!("astar {start} -> {goal}: endpoint is impassable");
            return Err(SearchFailure::Unreachable);
        }
        if start == goal {
            return Ok(vec![start]);
        }

        let score = |m: &HashMap<Coord, i32>, c: Coord| {
            m.get(&c).copied().unwrap_or(UNREACHABLE)
        };

        let mut g_score: HashMap<Coord, i32> = HashMap::new();
        let mut f_score: HashMap<Coord, i32> = HashMap::new();
        let mut came_from: HashMap<Coord, Coord> = HashMap::new();
        let mut open: Frontier<Coord> = Frontier::new();
        let mut open_membership: HashSet<Coord> = HashSet::new();

        g_score.insert(start, 0);
        f_score.insert(start, pather.estimate(start, goal));
        open.push(start, score(&f_score, start));
        open_membership.insert(start);

        let mut nbuf = Vec::with_capacity(4);
        let mut expanded = 0usize;

        loop {
            if self.is_cancelled() {
                log::debug!("astar {start} -> {goal}: cancelled after {expanded} expansions");
                return Err(SearchFailure::Cancelled);
            }

            let Some((current, f)) = open.pop_with_priority() else {
                break;
            };
            open_membership.remove(&current);
            log::trace!("astar pop {current} f={f}");

            if current == goal {
                let path = reconstruct(&came_from, goal);
                log::debug!(
                    "astar {start} -> {goal}: {} steps, {expanded} expansions",
                    path.len() - 1
                );
                return Ok(path);
            }

            let current_g = score(&g_score, current);
            nbuf.clear();
            pather.neighbors(current, &mut nbuf);

            for &n in nbuf.iter() {
                let tentative_g = current_g + pather.cost(current, n);
                if tentative_g >= score(&g_score, n) {
                    continue;
                }
                came_from.insert(n, current);
                g_score.insert(n, tentative_g);
                let f = tentative_g + pather.estimate(n, goal);
                f_score.insert(n, f);
                if open_membership.insert(n) {
                    open.push(n, f);
                    sink.cell_changed(CellStateChanged::new(n, CellState::Open));
                }
            }
            expanded += 1;

            if current != start {
                sink.cell_changed(CellStateChanged::new(current, CellState::Closed));
            }
        }

        log::debug!("astar {start} -> {goal}: unreachable after {expanded} expansions");
        Err(SearchFailure::Unreachable)
    }
}

/// Walk `came_from` links back from `goal` and return the path start-first.
fn reconstruct(came_from: &HashMap<Coord, Coord>, goal: Coord) -> Vec<Coord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Shortest path from `start` to `goal` without cancellation support.
///
/// Shorthand for `PathSearch::new().search(..)`.
pub fn search<P, S>(
    pather: &P,
    start: Coord,
    goal: Coord,
    sink: &mut S,
) -> Result<Vec<Coord>, SearchFailure>
where
    P: AstarPather + ?Sized,
    S: ProgressSink + ?Sized,
{
    PathSearch::new().search(pather, start, goal, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::bfs_distances;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use waypath_core::{FnSink, Grid};

    fn c(row: i32, col: i32) -> Coord {
        Coord::new(row, col)
    }

    fn assert_connected(grid: &Grid, path: &[Coord]) {
        for w in path.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1, "{} -> {} is not a step", w[0], w[1]);
            assert!(grid.is_passable(w[1]));
        }
    }

    #[test]
    fn open_five_by_five() {
        let grid = Grid::new(5, 5);
        let path = search(&grid, c(0, 0), c(4, 4), &mut ()).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path[0], c(0, 0));
        assert_eq!(path[8], c(4, 4));
        assert_connected(&grid, &path);
        // Ties resolve FIFO with neighbours explored below-first, so the
        // search walks straight down the first column before turning.
        assert_eq!(
            path,
            vec![
                c(0, 0),
                c(1, 0),
                c(2, 0),
                c(3, 0),
                c(4, 0),
                c(4, 1),
                c(4, 2),
                c(4, 3),
                c(4, 4),
            ]
        );
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut grid = Grid::new(8, 8);
        for row in 1..7 {
            grid.set_barrier(c(row, 4), true).unwrap();
        }
        let mut first: Vec<CellStateChanged> = Vec::new();
        let mut second: Vec<CellStateChanged> = Vec::new();
        let a = search(&grid, c(7, 0), c(0, 7), &mut first).unwrap();
        let b = search(&grid, c(7, 0), c(0, 7), &mut second).unwrap();
        assert_eq!(a, b);
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn same_cell_is_trivial() {
        let grid = Grid::new(3, 3);
        let mut events: Vec<CellStateChanged> = Vec::new();
        assert_eq!(search(&grid, c(1, 1), c(1, 1), &mut events), Ok(vec![c(1, 1)]));
        assert!(events.is_empty());
    }

    #[test]
    fn detours_around_wall() {
        // Vertical wall in column 2 with a gap at the bottom row.
        let mut grid = Grid::new(5, 5);
        for row in 0..4 {
            grid.set_barrier(c(row, 2), true).unwrap();
        }
        let path = search(&grid, c(0, 0), c(0, 4), &mut ()).unwrap();
        assert_connected(&grid, &path);
        assert_eq!(path.len() - 1, 12);
        assert!(path.contains(&c(4, 2)));
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let mut grid = Grid::new(6, 6);
        for n in c(3, 3).orthogonal() {
            grid.set_barrier(n, true).unwrap();
        }
        let mut events: Vec<CellStateChanged> = Vec::new();
        assert_eq!(
            search(&grid, c(0, 0), c(3, 3), &mut events),
            Err(SearchFailure::Unreachable)
        );

        let reachable = bfs_distances(&grid, c(0, 0));
        assert!(!events.is_empty());
        for ev in &events {
            assert!(reachable.contains_key(&ev.coord), "event outside component: {ev:?}");
        }
        assert!(events.iter().all(|ev| ev.coord != c(3, 3)));
    }

    #[test]
    fn barrier_goal_is_unreachable() {
        let mut grid = Grid::new(3, 3);
        grid.set_barrier(c(2, 2), true).unwrap();
        assert_eq!(search(&grid, c(0, 0), c(2, 2), &mut ()), Err(SearchFailure::Unreachable));
    }

    #[test]
    fn barrier_start_is_unreachable() {
        let mut grid = Grid::new(3, 3);
        grid.set_barrier(c(0, 0), true).unwrap();
        let mut events: Vec<CellStateChanged> = Vec::new();
        assert_eq!(
            search(&grid, c(0, 0), c(2, 2), &mut events),
            Err(SearchFailure::Unreachable)
        );
        assert!(events.is_empty());
        assert_eq!(search(&grid, c(0, 0), c(0, 0), &mut ()), Err(SearchFailure::Unreachable));
    }

    #[test]
    fn outside_endpoints_are_unreachable() {
        let grid = Grid::new(3, 3);
        assert_eq!(search(&grid, c(-1, 0), c(2, 2), &mut ()), Err(SearchFailure::Unreachable));
        assert_eq!(search(&grid, c(0, 0), c(3, 0), &mut ()), Err(SearchFailure::Unreachable));
    }

    #[test]
    fn events_never_close_start_or_goal() {
        let grid = Grid::new(6, 6);
        let (start, goal) = (c(2, 1), c(4, 5));
        let mut events: Vec<CellStateChanged> = Vec::new();
        search(&grid, start, goal, &mut events).unwrap();

        let closed: Vec<Coord> = events
            .iter()
            .filter(|ev| ev.new_role == CellState::Closed)
            .map(|ev| ev.coord)
            .collect();
        assert!(!closed.contains(&start));
        assert!(!closed.contains(&goal));
        assert!(
            events
                .iter()
                .any(|ev| ev.coord == goal && ev.new_role == CellState::Open)
        );
        // Every closed cell was opened first.
        for cc in closed {
            let opened = events
                .iter()
                .position(|ev| ev.coord == cc && ev.new_role == CellState::Open);
            let closed_at = events
                .iter()
                .position(|ev| ev.coord == cc && ev.new_role == CellState::Closed);
            assert!(opened < closed_at);
        }
    }

    #[test]
    fn matches_bfs_on_random_grids() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let rows = rng.random_range(2..12);
            let cols = rng.random_range(2..12);
            let mut grid = Grid::new(rows, cols);
            for cell in grid.bounds().iter() {
                if rng.random_range(0..100) < 30 {
                    grid.set_barrier(cell, true).unwrap();
                }
            }
            let start = c(rng.random_range(0..rows), rng.random_range(0..cols));
            let goal = c(rng.random_range(0..rows), rng.random_range(0..cols));
            grid.set_barrier(start, false).unwrap();
            grid.set_barrier(goal, false).unwrap();

            let expected = bfs_distances(&grid, start).get(&goal).copied();
            match search(&grid, start, goal, &mut ()) {
                Ok(path) => {
                    assert_eq!(Some(path.len() as i32 - 1), expected);
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    assert_connected(&grid, &path);
                }
                Err(failure) => {
                    assert_eq!(failure, SearchFailure::Unreachable);
                    assert_eq!(expected, None);
                }
            }
        }
    }

    #[test]
    fn pre_cancelled_search_stops_immediately() {
        let grid = Grid::new(4, 4);
        let token = CancelToken::new();
        token.cancel();
        let mut events: Vec<CellStateChanged> = Vec::new();
        let result = PathSearch::with_cancel(token).search(&grid, c(0, 0), c(3, 3), &mut events);
        assert_eq!(result, Err(SearchFailure::Cancelled));
        assert!(events.is_empty());
    }

    #[test]
    fn sink_can_request_cancellation() {
        let grid = Grid::new(20, 20);
        let token = CancelToken::new();
        let searcher = PathSearch::with_cancel(token.clone());
        let mut seen = 0;
        let mut sink = FnSink(|_| {
            seen += 1;
            if seen == 5 {
                token.cancel();
            }
        });
        let result = searcher.search(&grid, c(0, 0), c(19, 19), &mut sink);
        assert_eq!(result, Err(SearchFailure::Cancelled));
        // The rest of the expansion in progress may still report, but no
        // further pops happen.
        assert!(seen < 10, "saw {seen} events");
    }
}
