//! Raw artifact: one fixed-width record per pixel.
//!
//! Byte layout, repeated `width * height` times in row-major order:
//!
//! ```text
//! +----+----+----+----+
//! | b3 | b2 | b1 | b0 |   u32 codebook index, big-endian
//! +----+----+----+----+
//! ```
//!
//! There is no header. A decoder must be told the row width, and mapping
//! indices back to intensities needs the codebook used at encode time.

use std::io::{self, Write};

use super::error::CodecError;
use crate::grid::IndexGrid;

/// Bytes per serialized index.
pub const RECORD_SIZE: usize = 4;

/// Flat sequence of codebook indices, one per pixel, row-major.
///
/// # Example
///
/// ```
/// use vq_core::codec::{decode, encode};
/// use vq_core::IndexGrid;
///
/// let grid = IndexGrid::new(2, 2, vec![0, 0, 1, 1]).unwrap();
/// let artifact = encode(&grid);
///
/// assert_eq!(artifact.len(), 4);
/// assert_eq!(artifact.to_bytes().len(), 16);
/// assert_eq!(decode(&artifact, 2).unwrap(), grid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedArtifact {
    records: Vec<u32>,
}

impl CompressedArtifact {
    /// Wrap already-serialized records.
    pub fn from_records(records: Vec<u32>) -> Self {
        Self { records }
    }

    /// Parse big-endian records from bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::TruncatedRecord`] if the length is not a multiple of
    /// [`RECORD_SIZE`]; a trailing partial record is never dropped.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(CodecError::TruncatedRecord { bytes: bytes.len() });
        }
        let records = bytes
            .chunks_exact(RECORD_SIZE)
            .map(|chunk| u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { records })
    }

    /// Records in row-major order.
    #[inline]
    pub fn records(&self) -> &[u32] {
        &self.records
    }

    /// Number of records (pixels).
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the artifact holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialized size in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.records.len() * RECORD_SIZE
    }

    /// Serialize to big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for record in &self.records {
            bytes.extend_from_slice(&record.to_be_bytes());
        }
        bytes
    }

    /// Stream the big-endian bytes into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in &self.records {
            writer.write_all(&record.to_be_bytes())?;
        }
        Ok(())
    }
}

/// Serialize an index grid row by row.
pub fn encode(grid: &IndexGrid) -> CompressedArtifact {
    CompressedArtifact::from_records(grid.indices().to_vec())
}

/// Rebuild an index grid of `records / row_width` rows.
///
/// # Errors
///
/// - [`CodecError::ZeroRowWidth`] if `row_width` is zero
/// - [`CodecError::EmptyArtifact`] if there are no records
/// - [`CodecError::PartialRow`] if the record count is not a multiple of
///   `row_width`
pub fn decode(artifact: &CompressedArtifact, row_width: usize) -> Result<IndexGrid, CodecError> {
    if row_width == 0 {
        return Err(CodecError::ZeroRowWidth);
    }
    if artifact.is_empty() {
        return Err(CodecError::EmptyArtifact);
    }
    if artifact.len() % row_width != 0 {
        return Err(CodecError::PartialRow {
            records: artifact.len(),
            row_width,
        });
    }

    let height = artifact.len() / row_width;
    Ok(IndexGrid::new(row_width, height, artifact.records.clone())?)
}

/// [`CompressedArtifact::from_bytes`] followed by [`decode`].
pub fn decode_bytes(bytes: &[u8], row_width: usize) -> Result<IndexGrid, CodecError> {
    decode(&CompressedArtifact::from_bytes(bytes)?, row_width)
}
