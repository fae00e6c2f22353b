//! Test fixtures: scratch directories and PNG inputs.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vq_core::SampleGrid;
use vqpress::models::{AppConfig, ArtifactFormat};
use vqpress::services::sample_source::encode_png;

/// Scratch directory that lives as long as the test
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `grid` as an 8-bit grayscale PNG and return its path
    pub fn gray_png(&self, name: &str, grid: &SampleGrid) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, encode_png(grid).unwrap()).unwrap();
        path
    }

    /// Write an RGB PNG and return its path
    pub fn rgb_png(&self, name: &str, width: u32, height: u32, rgb: &[u8]) -> PathBuf {
        let path = self.path(name);
        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(rgb).unwrap();
        }
        std::fs::write(&path, buf).unwrap();
        path
    }

    pub fn write_yaml(&self, name: &str, yaml: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, yaml).unwrap();
        path
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Two flat bands, 10 above 200
pub fn two_tone(width: usize) -> SampleGrid {
    SampleGrid::from_rows(vec![vec![10; width], vec![200; width]]).unwrap()
}

/// Horizontal ramp with many distinct levels
pub fn gradient(width: usize, height: usize) -> SampleGrid {
    let samples = (0..width * height)
        .map(|i| ((i % width) * 255 / (width - 1)) as u8)
        .collect();
    SampleGrid::new(width, height, samples).unwrap()
}

/// Configuration with a fixed seed so runs are reproducible
pub fn seeded_config(codebook_size: i64, format: ArtifactFormat) -> AppConfig {
    let mut config = AppConfig::default();
    config.compression.codebook_size = codebook_size;
    config.compression.max_iterations = 10;
    config.compression.seed = Some(42);
    config.artifact.format = format;
    config
}
