use waypath_core::{Coord, Grid};

use crate::distance::manhattan;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `c` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>);

    /// Whether `c` belongs to the searchable domain. Searches starting or
    /// ending outside it fail immediately.
    fn contains(&self, _c: Coord) -> bool {
        true
    }

    /// Whether a path may stand on `c`. Searches whose start or goal is
    /// impassable fail immediately.
    fn is_passable(&self, _c: Coord) -> bool {
        true
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Coord, to: Coord) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Coord, to: Coord) -> i32;
}

// A grid is 4-connected with unit step cost, so Manhattan distance is both
// admissible and consistent.

impl Pather for Grid {
    #[inline]
    fn neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        self.neighbors_into(c, buf);
    }

    #[inline]
    fn contains(&self, c: Coord) -> bool {
        Grid::contains(self, c)
    }

    #[inline]
    fn is_passable(&self, c: Coord) -> bool {
        Grid::is_passable(self, c)
    }
}

impl WeightedPather for Grid {
    #[inline]
    fn cost(&self, _from: Coord, _to: Coord) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    #[inline]
    fn estimate(&self, from: Coord, to: Coord) -> i32 {
        manhattan(from, to)
    }
}
