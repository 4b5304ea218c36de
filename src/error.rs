//! Error types for gridmask operations.
//!
//! Every public grid operation fails fast with one of these kinds instead of
//! clamping or coercing its input.

use std::process::ExitCode;
use thiserror::Error;

/// Main error type for grid operations.
///
/// # Examples
///
/// ```
/// use gridmask::error::GridError;
///
/// let err = GridError::DimensionMismatch {
///     expected: (5, 5),
///     actual: (5, 4),
/// };
/// assert!(err.to_string().contains("dimension mismatch"));
/// ```
#[derive(Error, Debug)]
pub enum GridError {
    /// Requested grid dimensions are negative or too large to allocate.
    #[error("Invalid grid dimension: {rows}x{cols}")]
    InvalidDimension {
        /// Requested row count
        rows: i128,
        /// Requested column count
        cols: i128,
    },

    /// Coordinate lies outside the grid.
    #[error("Index out of range: ({row}, {col}) for a {rows}x{cols} grid")]
    IndexOutOfRange {
        /// Row coordinate as supplied
        row: i128,
        /// Column coordinate as supplied
        col: i128,
        /// Grid row count
        rows: usize,
        /// Grid column count
        cols: usize,
    },

    /// Two grids do not have matching shapes.
    #[error("Grid dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// Shape required by the operation
        expected: (usize, usize),
        /// Shape actually supplied
        actual: (usize, usize),
    },

    /// An argument violates its constraint.
    #[error("Invalid argument: {param} = {value}, expected {constraint}")]
    InvalidArgument {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Writing rendered output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GridError {
    /// Create an out-of-range error for a coordinate against a grid shape.
    #[must_use]
    pub fn index_out_of_range(row: i128, col: i128, shape: (usize, usize)) -> Self {
        Self::IndexOutOfRange {
            row,
            col,
            rows: shape.0,
            cols: shape.1,
        }
    }

    /// Create a dimension mismatch error from two shapes.
    #[must_use]
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(param: &str, value: impl ToString, constraint: &str) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Exit code reported by the `gridmask` binary for this error.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidDimension { .. } => ExitCode::from(2),
            Self::IndexOutOfRange { .. } => ExitCode::from(3),
            Self::DimensionMismatch { .. } => ExitCode::from(4),
            Self::InvalidArgument { .. } => ExitCode::from(5),
            Self::Io(_) => ExitCode::from(7),
            Self::Serialization(_) => ExitCode::from(8),
        }
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, GridError>;
