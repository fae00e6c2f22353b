use serde::Deserialize;
use std::path::Path;
use vq_core::VqConfig;

use crate::error::AppError;

/// Default configuration, compiled into the binary.
const DEFAULT_CONFIG: &str = include_str!("../../config.yaml");

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct AppConfig {
    /// Clustering parameters
    #[serde(default)]
    pub compression: CompressionSettings,

    /// Output artifact options
    #[serde(default)]
    pub artifact: ArtifactSettings,
}

/// Clustering parameters.
///
/// Signed so that negative values written by a user reach validation and
/// are reported as configuration errors rather than YAML type errors.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CompressionSettings {
    /// Number of codewords (K)
    #[serde(default = "default_codebook_size")]
    pub codebook_size: i64,

    /// Upper bound on clustering rounds
    #[serde(default = "default_max_iterations")]
    pub max_iterations: i64,

    /// Fixed seed for codebook seeding (fresh seed per run if absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_codebook_size() -> i64 {
    4
}

fn default_max_iterations() -> i64 {
    10
}

impl Default for CompressionSettings {
    fn default() -> Self {
        Self {
            codebook_size: default_codebook_size(),
            max_iterations: default_max_iterations(),
            seed: None,
        }
    }
}

impl CompressionSettings {
    /// Validate and convert to the core configuration.
    pub fn to_vq_config(&self) -> Result<VqConfig, AppError> {
        Ok(VqConfig::from_signed(
            self.codebook_size,
            self.max_iterations,
        )?)
    }
}

/// On-disk artifact layout
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Headerless records plus a JSON codebook sidecar
    #[default]
    Raw,
    /// Self-describing container with embedded dimensions and codebook
    Container,
}

impl std::str::FromStr for ArtifactFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "container" => Ok(Self::Container),
            other => Err(format!("unknown artifact format '{other}' (expected raw or container)")),
        }
    }
}

/// Output artifact options
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct ArtifactSettings {
    /// Artifact layout
    #[serde(default)]
    pub format: ArtifactFormat,

    /// Write the quantized preview image when no explicit path is given
    #[serde(default)]
    pub write_preview: bool,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `CONFIG_FILE` is
    /// consulted, and the embedded default is used when that is unset.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        Self::load_from(path, std::env::var("CONFIG_FILE").ok().as_deref())
    }

    /// [`load`](Self::load) with the `CONFIG_FILE` value passed in.
    pub fn load_from(path: Option<&Path>, env_path: Option<&str>) -> Result<Self, AppError> {
        match (path, env_path) {
            (Some(path), _) => Self::load_file(path),
            (None, Some(env_path)) => Self::load_file(Path::new(env_path)),
            (None, None) => {
                tracing::debug!("Using embedded default configuration");
                Self::from_yaml(DEFAULT_CONFIG)
            }
        }
    }

    /// Replace file values with any that were given on the command line.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(k) = overrides.codebook_size {
            self.compression.codebook_size = k;
        }
        if let Some(n) = overrides.max_iterations {
            self.compression.max_iterations = n;
        }
        if overrides.seed.is_some() {
            self.compression.seed = overrides.seed;
        }
        if let Some(format) = overrides.format {
            self.artifact.format = format;
        }
    }

    /// Load configuration from a YAML file
    pub fn load_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            codebook_size = config.compression.codebook_size,
            max_iterations = config.compression.max_iterations,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        // An empty document deserializes to unit, not a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub codebook_size: Option<i64>,
    pub max_iterations: Option<i64>,
    pub seed: Option<u64>,
    pub format: Option<ArtifactFormat>,
}
