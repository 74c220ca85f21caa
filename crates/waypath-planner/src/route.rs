//! The [`Route`] produced by a successful multi-leg run.

use waypath_core::Coord;

/// A complete route through every waypoint in order.
///
/// Consecutive legs share their junction waypoint, which appears once in
/// [`path`](Self::path).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    path: Vec<Coord>,
    stops: Vec<usize>,
}

impl Route {
    pub(crate) fn new() -> Self {
        Self {
            path: Vec::new(),
            stops: Vec::new(),
        }
    }

    /// Append a leg path. Its first cell must be the current last cell.
    pub(crate) fn push_leg(&mut self, leg: Vec<Coord>) {
        if self.path.is_empty() {
            self.stops.push(0);
            self.path.extend(leg);
        } else {
            debug_assert_eq!(self.path.last(), leg.first());
            self.path.extend(leg.into_iter().skip(1));
        }
        self.stops.push(self.path.len() - 1);
    }

    /// Every cell of the route, start first.
    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    /// `stops()[i]` is the index in [`path`](Self::path) of waypoint `i`.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of cells in the route.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of moves from start to end.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Number of legs.
    pub fn leg_count(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }

    /// Cells of leg `i`, both endpoints included.
    pub fn leg(&self, i: usize) -> Option<&[Coord]> {
        let from = *self.stops.get(i)?;
        let to = *self.stops.get(i + 1)?;
        Some(&self.path[from..=to])
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.path.contains(&c)
    }

    pub fn into_path(self) -> Vec<Coord> {
        self.path
    }
}
