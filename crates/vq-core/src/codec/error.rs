//! Error type for artifact encoding and decoding

use std::fmt;

use crate::codebook::CodebookError;
use crate::grid::GridError;

/// Error type for codec operations.
///
/// All variants except [`CodecError::ZeroRowWidth`] describe data that is
/// truncated, corrupt, or paired with the wrong codebook or dimensions. No
/// partial output is ever produced alongside one of these errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Caller asked to decode with a row width of zero
    ZeroRowWidth,
    /// Artifact holds no records
    EmptyArtifact,
    /// Record count is not a multiple of the row width
    PartialRow {
        /// Number of records in the artifact
        records: usize,
        /// Declared row width
        row_width: usize,
    },
    /// Byte length is not a multiple of the record size
    TruncatedRecord {
        /// Byte length of the artifact
        bytes: usize,
    },
    /// An index has no codeword in the supplied codebook
    IndexOutOfRange {
        /// Row-major position of the offending record
        position: usize,
        /// The index value found
        index: u32,
        /// Size of the codebook it was checked against
        codebook_size: usize,
    },
    /// Container does not start with the expected magic bytes
    BadMagic,
    /// Container version is not understood by this decoder
    UnsupportedVersion(u8),
    /// Container is shorter than its fixed header
    TruncatedHeader {
        /// Byte length of the container
        len: usize,
    },
    /// Container payload size disagrees with its header
    PayloadLength {
        /// Byte length implied by the header
        expected: usize,
        /// Actual byte length
        actual: usize,
    },
    /// Grid dimensions do not fit the container header or address space
    DimensionOverflow {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
    /// Decoded dimensions are not a valid grid
    Shape(GridError),
    /// Embedded codebook is invalid
    Codebook(CodebookError),
}

impl CodecError {
    /// Whether this error means the artifact itself is unusable, as opposed
    /// to a bad decode request.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, CodecError::ZeroRowWidth)
    }
}

impl From<GridError> for CodecError {
    fn from(err: GridError) -> Self {
        CodecError::Shape(err)
    }
}

impl From<CodebookError> for CodecError {
    fn from(err: CodebookError) -> Self {
        CodecError::Codebook(err)
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ZeroRowWidth => write!(f, "row width must be at least 1"),
            CodecError::EmptyArtifact => write!(f, "artifact contains no records"),
            CodecError::PartialRow { records, row_width } => {
                write!(
                    f,
                    "artifact has {} records, not a multiple of row width {}",
                    records, row_width
                )
            }
            CodecError::TruncatedRecord { bytes } => {
                write!(
                    f,
                    "artifact length {} bytes is not a multiple of the record size",
                    bytes
                )
            }
            CodecError::IndexOutOfRange {
                position,
                index,
                codebook_size,
            } => {
                write!(
                    f,
                    "index {} at position {} is outside a codebook of {} entries",
                    index, position, codebook_size
                )
            }
            CodecError::BadMagic => write!(f, "not a container artifact (bad magic)"),
            CodecError::UnsupportedVersion(v) => {
                write!(f, "unsupported container version {}", v)
            }
            CodecError::TruncatedHeader { len } => {
                write!(f, "container truncated: {} bytes is shorter than the header", len)
            }
            CodecError::PayloadLength { expected, actual } => {
                write!(
                    f,
                    "container payload is {} bytes, header implies {}",
                    actual, expected
                )
            }
            CodecError::DimensionOverflow { width, height } => {
                write!(f, "container dimensions {}x{} overflow", width, height)
            }
            CodecError::Shape(err) => write!(f, "invalid grid shape: {}", err),
            CodecError::Codebook(err) => write!(f, "invalid embedded codebook: {}", err),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Shape(err) => Some(err),
            CodecError::Codebook(err) => Some(err),
            _ => None,
        }
    }
}
