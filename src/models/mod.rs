pub mod config;
pub mod sidecar;

pub use config::{
    AppConfig, ArtifactFormat, ArtifactSettings, CompressionSettings, ConfigOverrides,
};
pub use sidecar::{sidecar_path_for, CodebookSidecar};
