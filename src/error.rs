//! Error type shared by the index, the coloring state and the adapters.

use thiserror::Error;

/// Errors raised while building, running, or evaluating a coloring.
#[derive(Debug, Error)]
pub enum ColoringError {
    /// Caller supplied a value outside the accepted domain (negative `n`, bad vertex,
    /// malformed coloring matrix).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Operation would break the monotonic-coloring contract, or needs a complete
    /// coloring and got a partial one.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The requested instance would exceed a configured size budget.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// A cooperative cancellation flag was observed between steps.
    #[error("cancelled after coloring {colored} of {total} edges")]
    Cancelled {
        /// Edges committed before the flag was observed.
        colored: usize,
        /// Total number of edges in the instance.
        total: usize,
    },

    /// Cancellation observed during exhaustive enumeration.
    #[error("search cancelled after {checked} of {total} colorings")]
    SearchCancelled {
        /// Colorings examined before the flag was observed.
        checked: u64,
        /// Size of the enumerated space.
        total: u64,
    },

    /// File I/O failure in one of the adapters.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColoringError>;
