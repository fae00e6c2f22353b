//! Codebook type and the clustering that builds it
//!
//! A [`Codebook`] is the ordered list of representative intensities an image
//! is quantized against. [`CodebookBuilder`] derives one from a sample
//! population with seeded k-means style iteration.

mod builder;
mod codebook;
mod error;

pub use builder::{
    BuildReport, ClusterStats, CodebookBuilder, MAX_CODEBOOK_SIZE, NEIGHBORHOOD_SIZE,
};
pub use codebook::Codebook;
pub use error::CodebookError;
