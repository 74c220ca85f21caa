//! Multi-leg route planning over a waypath grid.
//!
//! - [`RouteCoordinator`] keeps the ordered waypoint sequence and runs one
//!   A* search per leg, stitching the legs into a [`Route`].
//! - [`Board`] combines a grid with a coordinator behind the discrete
//!   [`Command`]s an input front end issues, and reports every visible
//!   change through a [`ProgressSink`](waypath_core::ProgressSink).
//! - [`Board::from_ascii`] loads boards from text, mainly for tests and
//!   command-line hosts.

pub mod board;
pub mod coordinator;
pub mod error;
pub mod layout;
pub mod route;

pub use board::{Board, Command, Outcome};
pub use coordinator::{RouteCoordinator, Waypoint};
pub use error::{CommandError, RouteError, RouteFailure};
pub use layout::LayoutError;
pub use route::Route;
