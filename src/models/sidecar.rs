use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use vq_core::{Codebook, Compressed, VqConfig};

use crate::error::AppError;

/// Current sidecar layout version
pub const SIDECAR_FORMAT_VERSION: u32 = 1;

/// Appended to the artifact file name to locate its sidecar
pub const SIDECAR_SUFFIX: &str = ".codebook.json";

/// Codebook and dimensions of a raw artifact, stored next to it as JSON.
///
/// The raw record stream carries neither, so without this file an artifact
/// cannot be decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodebookSidecar {
    pub format_version: u32,
    pub width: usize,
    pub height: usize,
    pub codebook_size: usize,
    pub codebook: Vec<u8>,
    pub max_iterations: usize,
    pub seed: u64,
    pub iterations_run: usize,
    /// Lowercase hex SHA-256 of the artifact bytes
    pub artifact_sha256: String,
    pub created_at: DateTime<Utc>,
}

impl CodebookSidecar {
    /// Describe a freshly compressed image and the artifact bytes written for it.
    pub fn from_compressed(compressed: &Compressed, config: &VqConfig, artifact: &[u8]) -> Self {
        let codebook = compressed.codebook().values().to_vec();
        Self {
            format_version: SIDECAR_FORMAT_VERSION,
            width: compressed.indices().width(),
            height: compressed.indices().height(),
            codebook_size: codebook.len(),
            codebook,
            max_iterations: config.max_iterations,
            seed: compressed.seed(),
            iterations_run: compressed.report().iterations_run,
            artifact_sha256: sha256_hex(artifact),
            created_at: Utc::now(),
        }
    }

    /// Read and validate a sidecar file.
    pub fn read(path: &Path) -> Result<Self, AppError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::MissingSidecar(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let sidecar: Self = serde_json::from_str(&content)?;
        sidecar.validate()?;
        Ok(sidecar)
    }

    /// Write as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.format_version != SIDECAR_FORMAT_VERSION {
            return Err(AppError::Sidecar(format!(
                "unsupported sidecar version {}",
                self.format_version
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(AppError::Sidecar(format!(
                "invalid dimensions {}x{}",
                self.width, self.height
            )));
        }
        if self.codebook.len() != self.codebook_size {
            return Err(AppError::Sidecar(format!(
                "codebook has {} entries, codebook_size says {}",
                self.codebook.len(),
                self.codebook_size
            )));
        }
        Ok(())
    }

    /// Fail with [`AppError::ChecksumMismatch`] unless `artifact` is the
    /// file this sidecar was written for.
    pub fn verify(&self, artifact: &[u8]) -> Result<(), AppError> {
        let actual = sha256_hex(artifact);
        if !actual.eq_ignore_ascii_case(&self.artifact_sha256) {
            return Err(AppError::ChecksumMismatch {
                expected: self.artifact_sha256.clone(),
                actual,
            });
        }
        Ok(())
    }

    pub fn codebook(&self) -> Result<Codebook, AppError> {
        Codebook::from_values(self.codebook.clone())
            .map_err(|e| AppError::Sidecar(e.to_string()))
    }

    /// Core configuration matching the artifact's codebook.
    pub fn vq_config(&self) -> VqConfig {
        VqConfig::new()
            .codebook_size(self.codebook_size)
            .max_iterations(self.max_iterations)
    }
}

/// `out.vq` -> `out.vq.codebook.json`
pub fn sidecar_path_for(artifact: &Path) -> PathBuf {
    let mut name = artifact.as_os_str().to_owned();
    name.push(SIDECAR_SUFFIX);
    PathBuf::from(name)
}

/// Lowercase hex SHA-256 digest
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_sidecar(artifact: &[u8]) -> CodebookSidecar {
        CodebookSidecar {
            format_version: SIDECAR_FORMAT_VERSION,
            width: 2,
            height: 2,
            codebook_size: 2,
            codebook: vec![10, 200],
            max_iterations: 5,
            seed: 7,
            iterations_run: 2,
            artifact_sha256: sha256_hex(artifact),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sidecar_path_for() {
        assert_eq!(
            sidecar_path_for(Path::new("/tmp/out.vq")),
            PathBuf::from("/tmp/out.vq.codebook.json")
        );
        assert_eq!(
            sidecar_path_for(Path::new("image")),
            PathBuf::from("image.codebook.json")
        );
    }

    #[test]
    fn test_sha256_hex_known_value() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_verify_accepts_matching_artifact() {
        let artifact = [0u8, 0, 0, 1];
        sample_sidecar(&artifact).verify(&artifact).unwrap();
    }

    #[test]
    fn test_verify_rejects_other_artifact() {
        let sidecar = sample_sidecar(&[0, 0, 0, 1]);
        let err = sidecar.verify(&[0, 0, 0, 2]).unwrap_err();
        assert!(matches!(err, AppError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_validate_codebook_length() {
        let mut sidecar = sample_sidecar(&[]);
        sidecar.codebook_size = 3;
        assert!(matches!(sidecar.validate(), Err(AppError::Sidecar(_))));
    }

    #[test]
    fn test_validate_zero_dimension() {
        let mut sidecar = sample_sidecar(&[]);
        sidecar.width = 0;
        assert!(matches!(sidecar.validate(), Err(AppError::Sidecar(_))));
    }

    #[test]
    fn test_write_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.vq.codebook.json");
        let sidecar = sample_sidecar(&[1, 2, 3]);

        sidecar.write(&path).unwrap();
        let loaded = CodebookSidecar::read(&path).unwrap();

        assert_eq!(loaded, sidecar);
        assert_eq!(loaded.codebook().unwrap().values(), &[10, 200]);
        assert_eq!(loaded.vq_config().codebook_size, 2);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.codebook.json");

        let err = CodebookSidecar::read(&path).unwrap_err();
        assert!(matches!(err, AppError::MissingSidecar(p) if p == path));
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.codebook.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            CodebookSidecar::read(&path),
            Err(AppError::Sidecar(_))
        ));
    }
}
