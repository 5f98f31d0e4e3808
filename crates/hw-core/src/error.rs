//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `HwError` as one variant
//! via `From`, so configuration problems surface with the same message no
//! matter which crate rejected them.

use thiserror::Error;

/// The top-level error type for `hw-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HwError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("cannot block {n_blocked} lanes on a {n_lanes}-lane highway")]
    TooManyBlockedLanes { n_blocked: usize, n_lanes: usize },

    #[error("invalid raw cell code {0} (expected -2, -1, or a velocity)")]
    InvalidCellCode(i32),

    #[error("raw grid has {got} cells, expected {expected}")]
    GridShape { expected: usize, got: usize },
}

/// Shorthand result type for all `hw-*` crates.
pub type HwResult<T> = Result<T, HwError>;
