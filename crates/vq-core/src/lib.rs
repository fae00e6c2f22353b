//! vq-core: codebook quantization for grayscale images
//!
//! This library reduces a grayscale image to a small codebook of
//! representative intensities, stores one codebook index per pixel, and
//! rebuilds an approximation of the image from those indices.
//!
//! # Quick Start
//!
//! The [`VqCompressor`] builder is the primary entry point:
//!
//! ```
//! use vq_core::{SampleGrid, VqCompressor, VqConfig};
//!
//! let grid = SampleGrid::new(4, 1, vec![0, 5, 250, 255]).unwrap();
//! let compressor = VqCompressor::new(VqConfig::new().codebook_size(2)).seed(42);
//!
//! let compressed = compressor.compress(&grid).unwrap();
//! let bytes = compressed.artifact().to_bytes();
//!
//! assert_eq!(bytes.len(), 4 * 4);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! SampleGrid (u8 per pixel)
//!     |
//!     v
//! CodebookBuilder         seed K values from a small sorted random subset,
//!     |                   then k-means: assign -> mean -> repeat
//!     v
//! Codebook (K x u8)
//!     |
//!     v
//! quantize                nearest codeword by |sample - value|,
//!     |                   ties to the lowest index
//!     v
//! IndexGrid (u32 per pixel)
//!     |
//!     v
//! codec::encode           4-byte big-endian record per pixel, no header
//!     |
//!     v
//! CompressedArtifact
//! ```
//!
//! Decoding runs the other way: [`codec::decode`] needs the row width,
//! [`quantize::reconstruct`] needs the codebook. Neither is stored in the raw
//! artifact; keep them alongside it, or use the self-describing
//! [`codec::container`] format.
//!
//! # Clustering Notes
//!
//! - Codeword updates use the floor of the integer mean.
//! - A codeword that attracts no samples keeps its previous value and is
//!   not re-seeded ("dead" codeword). It still occupies an index.
//! - Codeword order is fixed at seeding and never sorted afterwards.
//! - All randomness comes from the generator passed in, so a fixed seed
//!   gives an identical codebook.

pub mod api;
pub mod codebook;
pub mod codec;
pub mod grid;
pub mod quantize;


pub use api::{Compressed, VqCompressor, VqConfig, VqError};
pub use codebook::{BuildReport, Codebook, CodebookBuilder};
pub use codec::CompressedArtifact;
pub use grid::{Grid, IndexGrid, SampleGrid};
