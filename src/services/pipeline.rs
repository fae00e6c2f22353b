use std::path::{Path, PathBuf};
use vq_core::codec::container;
use vq_core::{CompressedArtifact, VqCompressor, VqConfig, VqError};

use crate::error::AppError;
use crate::models::{sidecar_path_for, AppConfig, ArtifactFormat, CodebookSidecar};
use crate::services::{PngSampleSource, SampleSource};

/// Appended to the artifact file name for the default preview path
pub const PREVIEW_SUFFIX: &str = ".preview.png";

/// Orchestrates image loading, compression and artifact/sidecar I/O.
///
/// Flow: SampleSource -> VqCompressor -> artifact (+ sidecar) -> disk
pub struct CompressionPipeline<S = PngSampleSource> {
    config: AppConfig,
    source: S,
}

/// What `compress` wrote
#[derive(Debug, Clone)]
pub struct CompressSummary {
    pub width: usize,
    pub height: usize,
    pub codebook: Vec<u8>,
    pub seed: u64,
    pub iterations_run: usize,
    pub converged: bool,
    pub distortion: u64,
    pub artifact_path: PathBuf,
    pub artifact_bytes: usize,
    pub sidecar_path: Option<PathBuf>,
    pub preview_path: Option<PathBuf>,
}

/// What `decompress` wrote
#[derive(Debug, Clone)]
pub struct DecompressSummary {
    pub width: usize,
    pub height: usize,
    pub codebook: Vec<u8>,
    pub format: ArtifactFormat,
    pub output_path: PathBuf,
}

/// Whether an artifact still matches its sidecar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    Verified,
    Mismatch,
    NoSidecar,
    /// Containers carry their own codebook
    NotApplicable,
}

/// Description of an artifact on disk
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub format: ArtifactFormat,
    pub bytes: usize,
    pub records: usize,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub codebook: Option<Vec<u8>>,
    pub seed: Option<u64>,
    pub checksum: ChecksumStatus,
}

impl CompressionPipeline<PngSampleSource> {
    pub fn new(config: AppConfig) -> Self {
        Self::with_source(config, PngSampleSource::new())
    }
}

impl<S: SampleSource> CompressionPipeline<S> {
    pub fn with_source(config: AppConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compress `input` into `output`.
    ///
    /// Raw artifacts get a `<output>.codebook.json` sidecar. A preview is
    /// written to `preview` when given, or next to the artifact when the
    /// configuration asks for one.
    pub fn compress(
        &self,
        input: &Path,
        output: &Path,
        preview: Option<&Path>,
    ) -> Result<CompressSummary, AppError> {
        let vq_config = self.config.compression.to_vq_config()?;
        let grid = self.source.load(input)?;

        let compressor = VqCompressor::new(vq_config).with_seed(self.config.compression.seed);
        let compressed = compressor.compress(&grid)?;
        let report = compressed.report();

        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            codebook_size = vq_config.codebook_size,
            seed = compressed.seed(),
            iterations = report.iterations_run,
            converged = report.converged,
            "Compressed image"
        );
        if report.dead_codewords > 0 {
            tracing::warn!(
                dead_codewords = report.dead_codewords,
                "Some codewords attracted no samples"
            );
        }

        let format = self.config.artifact.format;
        let (artifact_bytes, sidecar_path) = match format {
            ArtifactFormat::Raw => {
                let bytes = compressed.artifact().to_bytes();

                // Sidecar first: a raw artifact without one cannot be decoded
                let sidecar_path = sidecar_path_for(output);
                CodebookSidecar::from_compressed(&compressed, &vq_config, &bytes)
                    .write(&sidecar_path)?;
                tracing::debug!(path = %sidecar_path.display(), "Wrote codebook sidecar");

                if let Err(e) = std::fs::write(output, &bytes) {
                    if let Err(cleanup) = std::fs::remove_file(&sidecar_path) {
                        tracing::warn!(
                            path = %sidecar_path.display(),
                            error = %cleanup,
                            "Failed to remove orphaned sidecar"
                        );
                    }
                    return Err(e.into());
                }
                (bytes.len(), Some(sidecar_path))
            }
            ArtifactFormat::Container => {
                let bytes = compressed.container()?;
                std::fs::write(output, &bytes)?;
                (bytes.len(), None)
            }
        };
        tracing::info!(
            path = %output.display(),
            bytes = artifact_bytes,
            format = ?format,
            "Wrote artifact"
        );

        let preview_path = match preview {
            Some(path) => Some(path.to_path_buf()),
            None if self.config.artifact.write_preview => Some(preview_path_for(output)),
            None => None,
        };
        if let Some(path) = &preview_path {
            self.source.save(&compressed.preview(), path)?;
            tracing::info!(path = %path.display(), "Wrote preview image");
        }

        Ok(CompressSummary {
            width: grid.width(),
            height: grid.height(),
            codebook: compressed.codebook().values().to_vec(),
            seed: compressed.seed(),
            iterations_run: report.iterations_run,
            converged: report.converged,
            distortion: report.final_distortion(),
            artifact_path: output.to_path_buf(),
            artifact_bytes,
            sidecar_path,
            preview_path,
        })
    }

    /// Restore the image stored in `input` and write it to `output`.
    ///
    /// Containers are self-describing. Raw artifacts need their sidecar,
    /// found at `sidecar` or next to the artifact, and must match its
    /// checksum.
    pub fn decompress(
        &self,
        input: &Path,
        output: &Path,
        sidecar: Option<&Path>,
    ) -> Result<DecompressSummary, AppError> {
        let bytes = std::fs::read(input)?;

        let (format, codebook, grid) = if container::is_container(&bytes) {
            // The embedded codebook decides K
            let compressor = VqCompressor::new(VqConfig::default());
            let (codebook, grid) = compressor.decompress_container(&bytes)?;
            (ArtifactFormat::Container, codebook, grid)
        } else {
            let sidecar_path = sidecar
                .map(Path::to_path_buf)
                .unwrap_or_else(|| sidecar_path_for(input));
            let sidecar = CodebookSidecar::read(&sidecar_path)?;
            sidecar.verify(&bytes)?;

            let codebook = sidecar.codebook()?;
            let artifact = CompressedArtifact::from_bytes(&bytes).map_err(VqError::from)?;
            let grid = VqCompressor::new(sidecar.vq_config()).decompress(
                &artifact,
                sidecar.width,
                Some(&codebook),
            )?;
            if grid.height() != sidecar.height {
                return Err(AppError::Sidecar(format!(
                    "artifact holds {} rows, sidecar says {}",
                    grid.height(),
                    sidecar.height
                )));
            }
            (ArtifactFormat::Raw, codebook, grid)
        };

        self.source.save(&grid, output)?;
        tracing::info!(
            path = %output.display(),
            width = grid.width(),
            height = grid.height(),
            codebook_size = codebook.len(),
            "Restored image"
        );

        Ok(DecompressSummary {
            width: grid.width(),
            height: grid.height(),
            codebook: codebook.into_values(),
            format,
            output_path: output.to_path_buf(),
        })
    }

    /// Describe an artifact without writing anything.
    ///
    /// A raw artifact without a sidecar is still reported; only its record
    /// count is known then.
    pub fn inspect(&self, input: &Path, sidecar: Option<&Path>) -> Result<InspectReport, AppError> {
        let bytes = std::fs::read(input)?;

        if container::is_container(&bytes) {
            let (codebook, indices) =
                vq_core::codec::decode_container(&bytes).map_err(VqError::from)?;
            return Ok(InspectReport {
                format: ArtifactFormat::Container,
                bytes: bytes.len(),
                records: indices.len(),
                width: Some(indices.width()),
                height: Some(indices.height()),
                codebook: Some(codebook.into_values()),
                seed: None,
                checksum: ChecksumStatus::NotApplicable,
            });
        }

        let artifact = CompressedArtifact::from_bytes(&bytes).map_err(VqError::from)?;
        let sidecar_path = sidecar
            .map(Path::to_path_buf)
            .unwrap_or_else(|| sidecar_path_for(input));

        let mut report = InspectReport {
            format: ArtifactFormat::Raw,
            bytes: bytes.len(),
            records: artifact.len(),
            width: None,
            height: None,
            codebook: None,
            seed: None,
            checksum: ChecksumStatus::NoSidecar,
        };

        match CodebookSidecar::read(&sidecar_path) {
            Ok(sidecar) => {
                report.checksum = match sidecar.verify(&bytes) {
                    Ok(()) => ChecksumStatus::Verified,
                    Err(_) => ChecksumStatus::Mismatch,
                };
                report.width = Some(sidecar.width);
                report.height = Some(sidecar.height);
                report.seed = Some(sidecar.seed);
                report.codebook = Some(sidecar.codebook);
            }
            Err(AppError::MissingSidecar(path)) => {
                tracing::debug!(path = %path.display(), "No sidecar next to artifact");
            }
            Err(e) => return Err(e),
        }

        Ok(report)
    }
}

/// `out.vq` -> `out.vq.preview.png`
pub fn preview_path_for(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(PREVIEW_SUFFIX);
    PathBuf::from(name)
}
