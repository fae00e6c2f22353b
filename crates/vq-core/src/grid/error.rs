//! Error type for grid construction

use std::fmt;

/// Error type for grid shape validation.
///
/// Returned when a grid would violate the rectangular shape invariant:
/// at least one row, at least one column, and every row the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Width or height is zero
    ZeroDimension {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Flat buffer length does not equal `width * height`
    LengthMismatch {
        /// Buffer length
        len: usize,
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// A row's length differs from the first row's
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ZeroDimension { width, height } => {
                write!(f, "grid dimensions cannot be zero (got {}x{})", width, height)
            }
            GridError::LengthMismatch { len, width, height } => {
                write!(
                    f,
                    "buffer length {} does not match dimensions {}x{}",
                    len, width, height
                )
            }
            GridError::RaggedRow {
                row,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "row {} has {} entries, expected {}",
                    row, actual, expected
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
