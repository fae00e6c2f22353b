//! Nearest-codeword quantization and index-to-value reconstruction

mod quantizer;

pub(crate) use quantizer::nearest_position;
pub use quantizer::{nearest_index, quantize, reconstruct, total_distortion};
