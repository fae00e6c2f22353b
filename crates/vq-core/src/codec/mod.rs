//! Binary serialization of index grids
//!
//! The raw layout is the reference format: one 4-byte big-endian record per
//! pixel, row-major, no header. Width, height and the codebook travel
//! out-of-band. [`container`] adds an opt-in versioned format that embeds
//! them; it never replaces the raw layout.

mod artifact;
pub mod container;
mod error;

pub use artifact::{decode, decode_bytes, encode, CompressedArtifact, RECORD_SIZE};
pub use container::{decode_container, encode_container, is_container};
pub use error::CodecError;
