//! The [`Grid`] type — a fixed-size 2D array of [`Cell`]s.
//!
//! Adjacency is never stored: [`Grid::neighbors`] looks at the current
//! barrier state every time it is called, so barrier edits take effect
//! immediately for the next search.

use crate::cell::{Cell, Role};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::geom::{Bounds, BoundsIter, Coord};

/// A rows × cols board of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Bounds,
}

/// Unchecked wire form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    cells: Vec<Cell>,
    bounds: Bounds,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, Self::Error> {
        let bounds = Bounds::new(repr.bounds.rows, repr.bounds.cols);
        if bounds != repr.bounds || repr.cells.len() != bounds.len() {
            return Err(GridError::SizeMismatch {
                cells: repr.cells.len(),
                rows: repr.bounds.rows,
                cols: repr.bounds.cols,
            });
        }
        Ok(Self {
            cells: repr.cells,
            bounds,
        })
    }
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with empty cells.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            cells: vec![Cell::EMPTY; bounds.len()],
            bounds,
        }
    }

    /// Create a grid sized by `config`.
    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.rows, config.cols)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// Read the cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<Cell> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Role of the cell at `c`, or `None` if out of bounds.
    #[inline]
    pub fn role(&self, c: Coord) -> Option<Role> {
        self.at(c).map(|cell| cell.role)
    }

    /// Whether `c` is inside the grid and not a barrier.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.at(c).is_some_and(Cell::passable)
    }

    fn index_checked(&self, c: Coord) -> Result<usize, GridError> {
        self.bounds.index(c).ok_or(GridError::OutOfBounds(c))
    }

    /// Assign `role` to the cell at `c`.
    ///
    /// Waypoints cannot be placed on barriers; barriers go through the same
    /// checks as [`set_barrier`](Self::set_barrier).
    pub fn set_role(&mut self, c: Coord, role: Role) -> Result<(), GridError> {
        let i = self.index_checked(c)?;
        match role {
            Role::Barrier => return self.set_barrier(c, true),
            Role::Waypoint(_) if self.cells[i].role.is_barrier() => {
                return Err(GridError::WaypointOnBarrier(c));
            }
            _ => {}
        }
        self.cells[i].role = role;
        Ok(())
    }

    /// Mark or unmark the cell at `c` as a barrier.
    ///
    /// Unmarking only affects barriers; an empty cell stays empty.
    pub fn set_barrier(&mut self, c: Coord, is_barrier: bool) -> Result<(), GridError> {
        let i = self.index_checked(c)?;
        let cell = &mut self.cells[i];
        if cell.role.is_waypoint() {
            return Err(GridError::CannotBarrierWaypoint(c));
        }
        cell.role = if is_barrier { Role::Barrier } else { Role::Empty };
        Ok(())
    }

    /// Append the passable orthogonal neighbours of `c` into `buf`.
    ///
    /// Order is fixed: below, above, right, left. The caller clears `buf`.
    /// A coordinate outside the grid has no neighbours.
    pub fn neighbors_into(&self, c: Coord, buf: &mut Vec<Coord>) {
        if !self.contains(c) {
            return;
        }
        for n in c.orthogonal() {
            if self.is_passable(n) {
                buf.push(n);
            }
        }
    }

    /// Passable orthogonal neighbours of `c` under the current barrier state.
    pub fn neighbors(&self, c: Coord) -> Vec<Coord> {
        let mut buf = Vec::with_capacity(4);
        self.neighbors_into(c, &mut buf);
        buf
    }

    /// Restore the cell at `c` to empty, returning its previous role.
    pub fn reset(&mut self, c: Coord) -> Result<Role, GridError> {
        let i = self.index_checked(c)?;
        Ok(std::mem::take(&mut self.cells[i].role))
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Coordinates of every waypoint currently on the grid, row-major.
    pub fn waypoints(&self) -> impl Iterator<Item = (Coord, Role)> + '_ {
        self.iter()
            .filter(|(_, cell)| cell.role.is_waypoint())
            .map(|(c, cell)| (c, cell.role))
    }

    /// Row-major iterator over `(Coord, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Coord, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: BoundsIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Coord, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let c = self.inner.next()?;
        let i = self.grid.bounds.index(c)?;
        Some((c, self.grid.cells[i]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
