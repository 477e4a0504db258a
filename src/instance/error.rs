use thiserror::Error;

/// Errors raised when a TSP instance is malformed.
///
/// These are reported before any constraint is built; an infeasible but
/// well-formed instance is never an error.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Cost matrix row {row} has {found} entries, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Threshold must be finite, got {0}")]
    NonFiniteThreshold(f64),

    #[error("Distance from city {from} to city {to} is negative: {value}")]
    NegativeDistance { from: usize, to: usize, value: f64 },

    #[error("Distance from city {from} to city {to} is not finite")]
    NonFiniteDistance { from: usize, to: usize },

    #[error("Invalid distance range [{min}, {max}]")]
    InvalidDistanceRange { min: u32, max: u32 },
}
