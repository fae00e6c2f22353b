//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use std::path::Path;
use vq_core::SampleGrid;
use vqpress::services::sample_source::decode_png;

/// Assert the file is a PNG and return its samples
pub fn assert_png_file(path: &Path) -> SampleGrid {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG signature, got {:?}",
        &bytes[..8.min(bytes.len())]
    );
    decode_png(&bytes).unwrap()
}

/// Assert every sample of `grid` is one of `codebook`'s values
pub fn assert_samples_in_codebook(grid: &SampleGrid, codebook: &[u8]) {
    for (i, sample) in grid.samples().iter().enumerate() {
        assert!(
            codebook.contains(sample),
            "Sample {sample} at position {i} is not a codeword of {codebook:?}"
        );
    }
}

/// Assert the restored image has the source's shape
pub fn assert_same_shape(restored: &SampleGrid, source: &SampleGrid) {
    assert_eq!(
        (restored.width(), restored.height()),
        (source.width(), source.height()),
        "Restored image has a different shape"
    );
}
