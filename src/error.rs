use thiserror::Error;

use crate::gym::grid_world::{MAX_SIZE, MIN_SIZE};

/// Result type for grid world operations
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors raised while building a grid world or evaluating a policy on it
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid grid size {size}: must be in [{}, {}]", MIN_SIZE, MAX_SIZE)]
    InvalidGridSize { size: i64 },

    #[error("Cell ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBoundsCell { row: i64, col: i64, size: usize },

    #[error("Policy is {found}x{found} but the grid is {expected}x{expected}")]
    PolicyShapeMismatch { expected: usize, found: usize },

    #[error("Malformed request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}
