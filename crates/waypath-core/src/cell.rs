//! The [`Cell`] type — a single grid position and its [`Role`].

/// What a cell currently represents on the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    /// Impassable cell.
    Barrier,
    /// A route stop. `Some(0)` is the start, `Some(n)` a via-point with an
    /// ordinal fixed at placement time, and `None` the end marker set when
    /// the stops are finalized.
    Waypoint(Option<u32>),
}

impl Role {
    /// The start waypoint role.
    pub const START: Self = Self::Waypoint(Some(0));

    /// The end waypoint role.
    pub const END: Self = Self::Waypoint(None);

    /// Whether this role is any kind of waypoint.
    #[inline]
    pub const fn is_waypoint(self) -> bool {
        matches!(self, Self::Waypoint(_))
    }

    /// Whether this role blocks movement.
    #[inline]
    pub const fn is_barrier(self) -> bool {
        matches!(self, Self::Barrier)
    }
}

/// A single grid position.
///
/// Passability is derived from the role, so a waypoint can never be a
/// barrier at the same time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub role: Role,
}

impl Cell {
    /// An empty, passable cell.
    pub const EMPTY: Self = Self { role: Role::Empty };

    /// Set the role (builder).
    #[inline]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Whether movement through this cell is allowed.
    #[inline]
    pub const fn passable(self) -> bool {
        !self.role.is_barrier()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self.role, Role::Empty)
    }
}
