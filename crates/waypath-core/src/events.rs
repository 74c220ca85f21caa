//! Cell state notifications for observers (renderers, recorders).
//!
//! The planner and the search emit a [`CellStateChanged`] every time a cell
//! changes what it should look like. Nothing in the engine reads these back;
//! a [`ProgressSink`] may drop them entirely.

use crate::cell::Role;
use crate::geom::Coord;

/// Display state of a cell as seen by an observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Empty,
    Barrier,
    Start,
    End,
    /// An intermediate stop with its ordinal.
    Numbered(u32),
    /// Discovered and waiting in the search frontier.
    Open,
    /// Fully expanded by the search.
    Closed,
    /// Part of a computed route.
    Path,
}

impl CellState {
    /// Display state for a placed role.
    pub const fn from_role(role: Role) -> Self {
        match role {
            Role::Empty => Self::Empty,
            Role::Barrier => Self::Barrier,
            Role::Waypoint(Some(0)) => Self::Start,
            Role::Waypoint(Some(n)) => Self::Numbered(n),
            Role::Waypoint(None) => Self::End,
        }
    }
}

impl From<Role> for CellState {
    fn from(role: Role) -> Self {
        Self::from_role(role)
    }
}

/// A single cell transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellStateChanged {
    pub coord: Coord,
    pub new_role: CellState,
}

impl CellStateChanged {
    #[inline]
    pub const fn new(coord: Coord, new_role: CellState) -> Self {
        Self { coord, new_role }
    }
}

/// Receiver of [`CellStateChanged`] events.
///
/// Called synchronously from inside the search loop. Implementations must not
/// touch the grid being searched; setting a cancellation flag is fine.
pub trait ProgressSink {
    fn cell_changed(&mut self, event: CellStateChanged);
}

/// Discards every event.
impl ProgressSink for () {
    #[inline]
    fn cell_changed(&mut self, _event: CellStateChanged) {}
}

/// Records every event in order.
impl ProgressSink for Vec<CellStateChanged> {
    #[inline]
    fn cell_changed(&mut self, event: CellStateChanged) {
        self.push(event);
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    #[inline]
    fn cell_changed(&mut self, event: CellStateChanged) {
        (**self).cell_changed(event);
    }
}

/// Adapts a closure into a [`ProgressSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(CellStateChanged)> ProgressSink for FnSink<F> {
    #[inline]
    fn cell_changed(&mut self, event: CellStateChanged) {
        (self.0)(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_role_maps_waypoints() {
        assert_eq!(CellState::from(Role::START), CellState::Start);
        assert_eq!(CellState::from(Role::END), CellState::End);
        assert_eq!(CellState::from(Role::Waypoint(Some(4))), CellState::Numbered(4));
        assert_eq!(CellState::from(Role::Barrier), CellState::Barrier);
        assert_eq!(CellState::from(Role::Empty), CellState::Empty);
    }

    #[test]
    fn vec_sink_records_in_order() {
        let mut v: Vec<CellStateChanged> = Vec::new();
        let a = CellStateChanged::new(Coord::new(0, 0), CellState::Open);
        let b = CellStateChanged::new(Coord::new(0, 1), CellState::Closed);
        v.cell_changed(a);
        (&mut v).cell_changed(b);
        assert_eq!(v, vec![a, b]);
    }

    #[test]
    fn fn_sink_forwards() {
        let mut count = 0;
        {
            let mut sink = FnSink(|_| count += 1);
            sink.cell_changed(CellStateChanged::new(Coord::ZERO, CellState::Path));
            sink.cell_changed(CellStateChanged::new(Coord::ZERO, CellState::Path));
        }
        assert_eq!(count, 2);
    }
}
