//! VqCompressor builder -- the primary entry point for the crate.
//!
//! [`VqCompressor`] runs clustering, quantization and encoding with one
//! [`VqConfig`] and a reproducible seed, and undoes them given the codebook.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::VqConfig;
use super::error::VqError;
use crate::codebook::{BuildReport, Codebook};
use crate::codec::{self, CompressedArtifact};
use crate::grid::{IndexGrid, SampleGrid};
use crate::quantize::{quantize, reconstruct};

/// High-level compress/decompress builder.
///
/// - Constructor takes the [`VqConfig`] used in both directions
/// - [`seed()`](Self::seed) pins the random draw used for codebook seeding;
///   without it a fresh seed is drawn per call and reported in the result
/// - [`compress()`](Self::compress) takes `&self`, so one compressor can
///   process many images
///
/// # Example
///
/// ```
/// use vq_core::{SampleGrid, VqCompressor, VqConfig};
///
/// let grid = SampleGrid::from_rows(vec![vec![10, 10], vec![200, 200]]).unwrap();
/// let compressor = VqCompressor::new(VqConfig::new().codebook_size(2).max_iterations(5)).seed(1);
///
/// let compressed = compressor.compress(&grid).unwrap();
/// let artifact = compressed.artifact();
///
/// let restored = compressor
///     .decompress(&artifact, grid.width(), Some(compressed.codebook()))
///     .unwrap();
/// assert_eq!(restored, grid);
/// ```
#[derive(Debug, Clone)]
pub struct VqCompressor {
    config: VqConfig,
    seed: Option<u64>,
}

impl VqCompressor {
    /// Create a compressor for `config`.
    pub fn new(config: VqConfig) -> Self {
        Self { config, seed: None }
    }

    /// Use a fixed seed for codebook seeding.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use a fixed seed when `Some`, a fresh one per call when `None`.
    #[inline]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// The configuration used in both directions.
    #[inline]
    pub fn config(&self) -> &VqConfig {
        &self.config
    }

    /// Build a codebook for `grid` and quantize every sample against it.
    ///
    /// # Errors
    ///
    /// [`VqError::InvalidConfiguration`] if the configuration is invalid.
    pub fn compress(&self, grid: &SampleGrid) -> Result<Compressed, VqError> {
        self.config.validate()?;

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        let report = self
            .config
            .builder()
            .build_with_report(grid.samples(), &mut rng)?;
        let indices = quantize(grid, &report.codebook);

        Ok(Compressed {
            indices,
            report,
            seed,
        })
    }

    /// Decode a raw artifact and map its indices back to intensities.
    ///
    /// # Errors
    ///
    /// - [`VqError::MissingCodebook`] if `codebook` is `None`
    /// - [`VqError::InvalidConfiguration`] if the codebook size differs from
    ///   the configured one, or `row_width` is zero
    /// - [`VqError::MalformedArtifact`] if the record count is not a multiple
    ///   of `row_width`, or an index has no codeword
    pub fn decompress(
        &self,
        artifact: &CompressedArtifact,
        row_width: usize,
        codebook: Option<&Codebook>,
    ) -> Result<SampleGrid, VqError> {
        let codebook = codebook.ok_or(VqError::MissingCodebook)?;
        if codebook.len() != self.config.codebook_size {
            return Err(VqError::InvalidConfiguration(format!(
                "codebook has {} entries, configuration expects {}",
                codebook.len(),
                self.config.codebook_size
            )));
        }

        let indices = codec::decode(artifact, row_width)?;
        Ok(reconstruct(&indices, codebook)?)
    }

    /// Decode a self-describing container. The embedded codebook is
    /// authoritative; the configured codebook size is not consulted.
    pub fn decompress_container(&self, bytes: &[u8]) -> Result<(Codebook, SampleGrid), VqError> {
        let (codebook, indices) = codec::decode_container(bytes)?;
        let grid = reconstruct(&indices, &codebook)?;
        Ok((codebook, grid))
    }
}

/// Result of [`VqCompressor::compress`].
#[derive(Debug, Clone)]
pub struct Compressed {
    indices: IndexGrid,
    report: BuildReport,
    seed: u64,
}

impl Compressed {
    /// The codebook the indices refer to.
    #[inline]
    pub fn codebook(&self) -> &Codebook {
        &self.report.codebook
    }

    /// One codebook index per input sample.
    #[inline]
    pub fn indices(&self) -> &IndexGrid {
        &self.indices
    }

    /// Clustering statistics.
    #[inline]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Seed that produced the codebook; passing it back via
    /// [`VqCompressor::seed`] reproduces the same result.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Raw headerless artifact.
    pub fn artifact(&self) -> CompressedArtifact {
        codec::encode(&self.indices)
    }

    /// Self-describing container bytes.
    pub fn container(&self) -> Result<Vec<u8>, VqError> {
        Ok(codec::encode_container(self.codebook(), &self.indices)?)
    }

    /// The quantized image: every sample replaced by its codeword.
    pub fn preview(&self) -> SampleGrid {
        let values = self.report.codebook.values();
        // Indices come from quantizing against this codebook.
        self.indices.map(|index| values[index as usize])
    }
}
