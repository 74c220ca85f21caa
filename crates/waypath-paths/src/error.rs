use thiserror::Error;

/// Why a search returned no path. Both outcomes are expected results, not
/// faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchFailure {
    /// The goal is not connected to the start through passable cells.
    #[error("goal is unreachable from start")]
    Unreachable,
    /// The search was stopped through its cancellation token.
    #[error("search was cancelled")]
    Cancelled,
}
