use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    #[error("Spacing must be at least 1, got {spacing}")]
    InvalidSpacing { spacing: usize },

    #[error("Invalid order of accuracy {order}: {reason}")]
    InvalidOrder { order: usize, reason: String },

    #[error("Unsupported operator or side: {0}")]
    UnsupportedOperator(String),

    #[error("Dimension '{dim}' has length {len} but the stencil needs at least {required}")]
    InsufficientExtent {
        dim: String,
        len: usize,
        required: usize,
    },

    #[error("Specified dim '{dim}' does not match any dim of the field: {dims:?}")]
    DimensionNotFound { dim: String, dims: Vec<String> },

    #[error("No dim specified and field is not one-dimensional: {dims:?}")]
    AmbiguousDimension { dims: Vec<String> },

    #[error("Duplicate dimension name: {0}")]
    DuplicateDimension(String),

    #[error("Coordinates along '{dim}' do not match")]
    CoordinateMismatch { dim: String },

    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },

    #[error("Hybrid coefficients must have length {expected}, found {found}")]
    InvalidCoefficients { expected: usize, found: usize },
}

impl DiffError {
    pub(crate) fn insufficient(dim: &str, len: usize, required: usize) -> Self {
        DiffError::InsufficientExtent {
            dim: dim.to_string(),
            len,
            required,
        }
    }
}
