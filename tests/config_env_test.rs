//! CONFIG_FILE handling. Kept in its own test binary because it mutates the
//! process environment.

mod common;

use pretty_assertions::assert_eq;
use vqpress::models::{AppConfig, ArtifactFormat, ConfigOverrides};
use vqpress::services::CompressionPipeline;

use common::fixtures::gradient;
use common::Workspace;

#[test]
fn test_config_file_env_then_command_line_overrides() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml(
        "env.yaml",
        "compression:\n  codebook_size: 3\n  max_iterations: 4\n  seed: 11\nartifact:\n  format: raw\n",
    );
    std::env::set_var("CONFIG_FILE", &config_path);

    let mut config = AppConfig::load(None).unwrap();
    std::env::remove_var("CONFIG_FILE");
    assert_eq!(config.compression.codebook_size, 3);
    assert_eq!(config.compression.seed, Some(11));

    config.apply_overrides(&ConfigOverrides {
        codebook_size: Some(2),
        format: Some(ArtifactFormat::Container),
        ..Default::default()
    });

    let input = ws.gray_png("in.png", &gradient(6, 2));
    let summary = CompressionPipeline::new(config)
        .compress(&input, &ws.path("out.vqix"), None)
        .unwrap();

    assert_eq!(summary.codebook.len(), 2);
    assert_eq!(summary.seed, 11);
    assert!(summary.iterations_run <= 4);
    assert!(summary.sidecar_path.is_none());
}
