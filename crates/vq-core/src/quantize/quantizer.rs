//! Per-sample quantizer.
//!
//! Distance is the absolute intensity difference. Scanning runs in index
//! order with a strict `<`, so when several codewords are equally close the
//! lowest index wins. Encoding depends on this rule being deterministic.

use crate::codebook::Codebook;
use crate::codec::CodecError;
use crate::grid::{IndexGrid, SampleGrid};

/// Position of the closest value in a non-empty codeword slice.
#[inline]
pub(crate) fn nearest_position(sample: u8, codewords: &[u8]) -> usize {
    let mut best_index = 0;
    let mut best_distance = u16::MAX;
    for (index, &codeword) in codewords.iter().enumerate() {
        let distance = u16::from(sample.abs_diff(codeword));
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }
    best_index
}

/// Index of the codeword nearest to `sample`; ties go to the lowest index.
///
/// # Example
///
/// ```
/// use vq_core::{quantize::nearest_index, Codebook};
///
/// let codebook = Codebook::from_values(vec![10, 10]).unwrap();
/// assert_eq!(nearest_index(10, &codebook), 0);
/// ```
#[inline]
pub fn nearest_index(sample: u8, codebook: &Codebook) -> u32 {
    // Codebook construction guarantees the length fits a u32.
    nearest_position(sample, codebook.values()) as u32
}

/// Map every sample to its nearest codeword index.
pub fn quantize(grid: &SampleGrid, codebook: &Codebook) -> IndexGrid {
    grid.map(|sample| nearest_index(sample, codebook))
}

/// Replace every index by its codeword value.
///
/// # Errors
///
/// [`CodecError::IndexOutOfRange`] if an index has no codeword, which means
/// the index grid and the codebook do not belong together.
pub fn reconstruct(indices: &IndexGrid, codebook: &Codebook) -> Result<SampleGrid, CodecError> {
    let samples = indices
        .indices()
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            codebook.value(index).ok_or(CodecError::IndexOutOfRange {
                position,
                index,
                codebook_size: codebook.len(),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Ok(SampleGrid::new(indices.width(), indices.height(), samples)?)
}

/// Sum of `|sample - nearest codeword|` over all samples.
pub fn total_distortion(samples: &[u8], codebook: &Codebook) -> u64 {
    let codewords = codebook.values();
    samples
        .iter()
        .map(|&s| u64::from(s.abs_diff(codewords[nearest_position(s, codewords)])))
        .sum()
}
