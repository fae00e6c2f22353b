//! Configuration shared by compression and decompression.

use super::error::VqError;
use crate::codebook::{CodebookBuilder, MAX_CODEBOOK_SIZE};

/// Parameters that must be identical on both sides of an artifact.
///
/// One `VqConfig` is handed to [`VqCompressor`](super::VqCompressor) and used
/// for both directions, so the codebook size checked at decode time is the
/// one clustering produced.
///
/// # Defaults
///
/// - `codebook_size`: 4
/// - `max_iterations`: 10
///
/// # Example
///
/// ```
/// use vq_core::VqConfig;
///
/// let config = VqConfig::new().codebook_size(8).max_iterations(20);
/// assert!(config.validate().is_ok());
///
/// assert!(VqConfig::from_signed(4, -1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VqConfig {
    /// Number of codewords (K). Must be in `1..=MAX_CODEBOOK_SIZE`.
    pub codebook_size: usize,
    /// Upper bound on clustering rounds. Zero keeps the seeded codebook.
    pub max_iterations: usize,
}

impl Default for VqConfig {
    fn default() -> Self {
        Self {
            codebook_size: 4,
            max_iterations: 10,
        }
    }
}

impl VqConfig {
    /// Create a config with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert user-facing signed values, rejecting negatives.
    ///
    /// # Errors
    ///
    /// [`VqError::InvalidConfiguration`] if either value is negative or the
    /// codebook size is zero.
    pub fn from_signed(codebook_size: i64, max_iterations: i64) -> Result<Self, VqError> {
        let codebook_size = usize::try_from(codebook_size).map_err(|_| {
            VqError::InvalidConfiguration(format!(
                "codebook size must be at least 1, got {codebook_size}"
            ))
        })?;
        let max_iterations = usize::try_from(max_iterations).map_err(|_| {
            VqError::InvalidConfiguration(format!(
                "max iterations cannot be negative, got {max_iterations}"
            ))
        })?;

        let config = Self {
            codebook_size,
            max_iterations,
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the codebook size.
    #[inline]
    pub fn codebook_size(mut self, k: usize) -> Self {
        self.codebook_size = k;
        self
    }

    /// Set the iteration cap.
    #[inline]
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Check the codebook size.
    ///
    /// # Errors
    ///
    /// [`VqError::InvalidConfiguration`] if the codebook size is zero or
    /// exceeds [`MAX_CODEBOOK_SIZE`].
    pub fn validate(&self) -> Result<(), VqError> {
        if self.codebook_size == 0 {
            return Err(VqError::InvalidConfiguration(
                "codebook size must be at least 1, got 0".to_string(),
            ));
        }
        if self.codebook_size > MAX_CODEBOOK_SIZE {
            return Err(VqError::InvalidConfiguration(format!(
                "codebook size {} exceeds the maximum of {MAX_CODEBOOK_SIZE}",
                self.codebook_size
            )));
        }
        Ok(())
    }

    /// Clustering builder for this configuration.
    pub fn builder(&self) -> CodebookBuilder {
        CodebookBuilder::new(self.codebook_size, self.max_iterations)
    }
}
