use thiserror::Error;

/// Shared error type for every crate in the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinregError {
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Index out of bounds: index {index} for axis {axis} with size {size}")]
    IndexOutOfBounds {
        index: usize,
        axis: usize,
        size: usize,
    },

    #[error("Singular matrix: cannot invert")]
    SingularMatrix,

    #[error("Model is not yet fitted")]
    NotFitted,

    #[error("Method {0:?} not available for training linear regression")]
    InvalidMethod(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

pub type LinregResult<T> = Result<T, LinregError>;
