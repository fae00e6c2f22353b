//! Unified error type for the vq-core public API.
//!
//! [`VqError`] folds the per-module errors into the three conditions a
//! caller has to tell apart: bad configuration, bad artifact data, and a
//! missing codebook.

use std::fmt;

use crate::codebook::CodebookError;
use crate::codec::CodecError;
use crate::grid::GridError;

/// Unified error type for the vq-core public API.
///
/// # Example
///
/// ```
/// use vq_core::codec::{decode, CompressedArtifact};
/// use vq_core::VqError;
///
/// fn decode_four_wide(records: Vec<u32>) -> Result<usize, VqError> {
///     let grid = decode(&CompressedArtifact::from_records(records), 4)?;
///     Ok(grid.height())
/// }
///
/// assert!(matches!(
///     decode_four_wide(vec![0; 7]),
///     Err(VqError::MalformedArtifact(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VqError {
    /// Codebook size, iteration cap, grid shape or row width is invalid
    InvalidConfiguration(String),
    /// Artifact data is truncated, corrupt, or does not match its codebook
    MalformedArtifact(CodecError),
    /// Reconstruction was requested without a codebook
    MissingCodebook,
}

impl fmt::Display for VqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VqError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {}", msg),
            VqError::MalformedArtifact(err) => write!(f, "malformed artifact: {}", err),
            VqError::MissingCodebook => {
                write!(f, "a codebook is required to reconstruct intensities")
            }
        }
    }
}

impl std::error::Error for VqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VqError::MalformedArtifact(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridError> for VqError {
    fn from(err: GridError) -> Self {
        VqError::InvalidConfiguration(err.to_string())
    }
}

impl From<CodebookError> for VqError {
    fn from(err: CodebookError) -> Self {
        VqError::InvalidConfiguration(err.to_string())
    }
}

impl From<CodecError> for VqError {
    fn from(err: CodecError) -> Self {
        if err.is_malformed() {
            VqError::MalformedArtifact(err)
        } else {
            VqError::InvalidConfiguration(err.to_string())
        }
    }
}
