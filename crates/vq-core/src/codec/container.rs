//! Self-describing container (version 1).
//!
//! An opt-in wrapper around the raw records that carries everything a
//! decoder needs. All integers are big-endian.
//!
//! ```text
//! offset  size   field
//! 0       4      magic "VQIX"
//! 4       1      version (1)
//! 5       4      width  (u32)
//! 9       4      height (u32)
//! 13      4      codebook size K (u32)
//! 17      K      codeword values, one byte each, in index order
//! 17+K    4*N    raw records, N = width * height
//! ```

use super::artifact::{decode, encode, CompressedArtifact, RECORD_SIZE};
use super::error::CodecError;
use crate::codebook::Codebook;
use crate::grid::{GridError, IndexGrid};
use crate::quantize::reconstruct;

/// Leading bytes identifying a container.
pub const MAGIC: [u8; 4] = *b"VQIX";

/// Container version written by [`encode_container`].
pub const VERSION: u8 = 1;

/// Size of the fixed header preceding the codebook.
pub const HEADER_LEN: usize = 17;

/// Whether `bytes` starts with the container magic.
pub fn is_container(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC)
}

/// Serialize a codebook and its index grid into one container.
///
/// # Errors
///
/// [`CodecError::DimensionOverflow`] if a grid dimension exceeds `u32::MAX`.
pub fn encode_container(codebook: &Codebook, grid: &IndexGrid) -> Result<Vec<u8>, CodecError> {
    let overflow = || CodecError::DimensionOverflow {
        width: grid.width(),
        height: grid.height(),
    };
    let width = u32::try_from(grid.width()).map_err(|_| overflow())?;
    let height = u32::try_from(grid.height()).map_err(|_| overflow())?;
    // Codebook construction bounds K to u32.
    let k = codebook.len() as u32;

    let artifact = encode(grid);
    let mut out = Vec::with_capacity(HEADER_LEN + codebook.len() + artifact.byte_len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&k.to_be_bytes());
    out.extend_from_slice(codebook.values());
    out.extend_from_slice(&artifact.to_bytes());
    Ok(out)
}

/// Parse a container back into its codebook and index grid.
///
/// Every index is checked against the embedded codebook, so a successful
/// decode can always be reconstructed.
///
/// # Errors
///
/// - [`CodecError::TruncatedHeader`] if shorter than the fixed header
/// - [`CodecError::BadMagic`] / [`CodecError::UnsupportedVersion`]
/// - [`CodecError::Codebook`] if K is zero
/// - [`CodecError::Shape`] if width or height is zero
/// - [`CodecError::DimensionOverflow`] if `width * height` cannot be addressed
/// - [`CodecError::PayloadLength`] if the byte length disagrees with the header
/// - [`CodecError::IndexOutOfRange`] if a record exceeds the codebook
pub fn decode_container(bytes: &[u8]) -> Result<(Codebook, IndexGrid), CodecError> {
    if bytes.len() < HEADER_LEN {
        return Err(CodecError::TruncatedHeader { len: bytes.len() });
    }
    if !is_container(bytes) {
        return Err(CodecError::BadMagic);
    }
    let version = bytes[4];
    if version != VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let width = read_u32(bytes, 5) as usize;
    let height = read_u32(bytes, 9) as usize;
    let k = read_u32(bytes, 13) as usize;

    let expected = width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(RECORD_SIZE))
        .and_then(|n| n.checked_add(HEADER_LEN + k))
        .ok_or(CodecError::DimensionOverflow { width, height })?;
    if bytes.len() != expected {
        return Err(CodecError::PayloadLength {
            expected,
            actual: bytes.len(),
        });
    }

    let codebook = Codebook::from_values(bytes[HEADER_LEN..HEADER_LEN + k].to_vec())?;
    if width == 0 || height == 0 {
        return Err(GridError::ZeroDimension { width, height }.into());
    }

    let artifact = CompressedArtifact::from_bytes(&bytes[HEADER_LEN + k..])?;
    let grid = decode(&artifact, width)?;
    reconstruct(&grid, &codebook)?;

    Ok((codebook, grid))
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Codebook, IndexGrid) {
        let codebook = Codebook::from_values(vec![10, 200]).unwrap();
        let grid = IndexGrid::from_rows(vec![vec![0, 0, 1], vec![1, 1, 0]]).unwrap();
        (codebook, grid)
    }

    #[test]
    fn test_header_layout() {
        let (codebook, grid) = sample();
        let bytes = encode_container(&codebook, &grid).unwrap();

        assert_eq!(&bytes[0..4], b"VQIX");
        assert_eq!(bytes[4], VERSION);
        assert_eq!(&bytes[5..9], &[0, 0, 0, 3]);
        assert_eq!(&bytes[9..13], &[0, 0, 0, 2]);
        assert_eq!(&bytes[13..17], &[0, 0, 0, 2]);
        assert_eq!(&bytes[17..19], &[10, 200]);
        assert_eq!(bytes.len(), HEADER_LEN + 2 + 6 * RECORD_SIZE);
    }

    #[test]
    fn test_payload_is_raw_layout() {
        let (codebook, grid) = sample();
        let bytes = encode_container(&codebook, &grid).unwrap();
        assert_eq!(&bytes[HEADER_LEN + 2..], encode(&grid).to_bytes().as_slice());
    }

    #[test]
    fn test_decode_restores_codebook_and_grid() {
        let (codebook, grid) = sample();
        let bytes = encode_container(&codebook, &grid).unwrap();

        assert_eq!(decode_container(&bytes).unwrap(), (codebook, grid));
    }

    #[test]
    fn test_is_container() {
        let (codebook, grid) = sample();
        assert!(is_container(&encode_container(&codebook, &grid).unwrap()));
        assert!(!is_container(&encode(&grid).to_bytes()));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let (codebook, grid) = sample();
        let mut bytes = encode_container(&codebook, &grid).unwrap();
        bytes[0] = b'X';
        assert_eq!(decode_container(&bytes), Err(CodecError::BadMagic));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let (codebook, grid) = sample();
        let mut bytes = encode_container(&codebook, &grid).unwrap();
        bytes[4] = 9;
        assert_eq!(decode_container(&bytes), Err(CodecError::UnsupportedVersion(9)));
    }

    #[test]
    fn test_rejects_truncated_header() {
        assert_eq!(
            decode_container(b"VQIX\x01"),
            Err(CodecError::TruncatedHeader { len: 5 })
        );
    }

    #[test]
    fn test_rejects_truncated_payload() {
        let (codebook, grid) = sample();
        let mut bytes = encode_container(&codebook, &grid).unwrap();
        let full = bytes.len();
        bytes.pop();

        assert_eq!(
            decode_container(&bytes),
            Err(CodecError::PayloadLength {
                expected: full,
                actual: full - 1
            })
        );
    }

    #[test]
    fn test_rejects_index_beyond_codebook() {
        let codebook = Codebook::from_values(vec![10, 200]).unwrap();
        let grid = IndexGrid::new(2, 1, vec![0, 5]).unwrap();
        let bytes = encode_container(&codebook, &grid).unwrap();

        assert_eq!(
            decode_container(&bytes),
            Err(CodecError::IndexOutOfRange {
                position: 1,
                index: 5,
                codebook_size: 2
            })
        );
    }

    #[test]
    fn test_rejects_zero_codebook() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&MAGIC);
        bytes.push(VERSION);
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&1u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&0u32.to_be_bytes());

        assert!(matches!(
            decode_container(&bytes),
            Err(CodecError::Codebook(_))
        ));
    }
}
