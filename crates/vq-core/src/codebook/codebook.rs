//! Codebook struct: ordered representative intensities.

use super::error::CodebookError;
use crate::quantize;

/// An ordered, immutable list of representative intensity values.
///
/// The position of a value is its identity: artifacts store positions, not
/// values, so the order established when the codebook is built must be kept
/// for as long as any artifact refers to it. Values are not required to be
/// distinct; a clustering run can leave two codewords on the same value.
///
/// # Example
///
/// ```
/// use vq_core::Codebook;
///
/// let codebook = Codebook::from_values(vec![10, 200]).unwrap();
///
/// assert_eq!(codebook.len(), 2);
/// assert_eq!(codebook.nearest_index(30), 0);
/// assert_eq!(codebook.nearest_index(180), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    values: Vec<u8>,
}

impl Codebook {
    /// Create a codebook from codeword values in index order.
    ///
    /// # Errors
    ///
    /// - [`CodebookError::EmptyCodebook`] if `values` is empty
    /// - [`CodebookError::CodebookTooLarge`] if the length does not fit a `u32` index
    pub fn from_values(values: Vec<u8>) -> Result<Self, CodebookError> {
        if values.is_empty() {
            return Err(CodebookError::EmptyCodebook);
        }
        if u32::try_from(values.len()).is_err() {
            return Err(CodebookError::CodebookTooLarge { size: values.len() });
        }
        Ok(Self { values })
    }

    /// Number of codewords (K).
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: empty codebooks are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Codeword values in index order.
    #[inline]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Codeword at `index`, or `None` when out of range.
    #[inline]
    pub fn value(&self, index: u32) -> Option<u8> {
        self.values.get(index as usize).copied()
    }

    /// Index of the codeword closest to `sample`.
    ///
    /// See [`quantize::nearest_index`] for the tie-break rule.
    #[inline]
    pub fn nearest_index(&self, sample: u8) -> u32 {
        quantize::nearest_index(sample, self)
    }

    /// Consume the codebook and return its values.
    pub fn into_values(self) -> Vec<u8> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_values_rejects_empty() {
        assert_eq!(
            Codebook::from_values(vec![]).unwrap_err(),
            CodebookError::EmptyCodebook
        );
    }

    #[test]
    fn test_duplicate_values_are_allowed() {
        let codebook = Codebook::from_values(vec![10, 10, 10]).unwrap();
        assert_eq!(codebook.len(), 3);
        assert_eq!(codebook.values(), &[10, 10, 10]);
    }

    #[test]
    fn test_value_lookup() {
        let codebook = Codebook::from_values(vec![0, 128, 255]).unwrap();

        assert_eq!(codebook.value(0), Some(0));
        assert_eq!(codebook.value(2), Some(255));
        assert_eq!(codebook.value(3), None);
    }

    #[test]
    fn test_into_values_preserves_order() {
        let codebook = Codebook::from_values(vec![200, 10, 90]).unwrap();
        assert_eq!(codebook.into_values(), vec![200, 10, 90]);
    }
}
