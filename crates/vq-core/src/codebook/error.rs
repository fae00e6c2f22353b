//! Error type for codebook construction

use std::fmt;

/// Error type for codebook construction and clustering.
///
/// Every variant is a caller-side configuration problem; the clustering
/// itself has no failure path once its inputs are valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodebookError {
    /// No codeword values supplied
    EmptyCodebook,
    /// Requested codebook size is zero
    ZeroCodebookSize,
    /// Codebook size cannot be addressed by a 32-bit index
    CodebookTooLarge {
        /// Requested size
        size: usize,
    },
    /// Requested codebook size exceeds [`MAX_CODEBOOK_SIZE`](super::MAX_CODEBOOK_SIZE)
    TooManyCodewords {
        /// Requested size
        size: usize,
    },
    /// No samples to cluster
    EmptySamples,
}

impl fmt::Display for CodebookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodebookError::EmptyCodebook => write!(f, "codebook cannot be empty"),
            CodebookError::ZeroCodebookSize => {
                write!(f, "codebook size must be at least 1")
            }
            CodebookError::CodebookTooLarge { size } => {
                write!(
                    f,
                    "codebook size {} exceeds the 32-bit index range",
                    size
                )
            }
            CodebookError::TooManyCodewords { size } => {
                write!(
                    f,
                    "codebook size {} exceeds the maximum of {} (one per 8-bit intensity)",
                    size,
                    super::MAX_CODEBOOK_SIZE
                )
            }
            CodebookError::EmptySamples => write!(f, "cannot build a codebook from zero samples"),
        }
    }
}

impl std::error::Error for CodebookError {}
