//! Rectangular row-major grids
//!
//! [`SampleGrid`] carries the grayscale intensities handed over by a sample
//! source, [`IndexGrid`] the codebook index chosen for each of them. Both
//! are the same [`Grid`] type and share its shape invariants.

mod error;
mod grid;

pub use error::GridError;
pub use grid::{Grid, IndexGrid, SampleGrid};
