//! Configuration files driving the pipeline.

mod common;

use pretty_assertions::assert_eq;
use vq_core::VqError;
use vqpress::error::AppError;
use vqpress::models::{sidecar_path_for, AppConfig, ArtifactFormat, CodebookSidecar};
use vqpress::services::CompressionPipeline;

use common::fixtures::gradient;
use common::Workspace;

#[test]
fn test_config_file_controls_compression() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml(
        "vqpress.yaml",
        r#"
compression:
  codebook_size: 3
  max_iterations: 7
  seed: 99
artifact:
  format: raw
  write_preview: true
"#,
    );
    let input = ws.gray_png("in.png", &gradient(12, 2));
    let artifact = ws.path("out.vq");

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let summary = CompressionPipeline::new(config)
        .compress(&input, &artifact, None)
        .unwrap();

    assert_eq!(summary.codebook.len(), 3);
    assert_eq!(summary.seed, 99);
    assert!(summary.iterations_run <= 7);

    let preview = summary.preview_path.expect("preview requested by config");
    common::assert_samples_in_codebook(&common::assert_png_file(&preview), &summary.codebook);

    let sidecar = CodebookSidecar::read(&sidecar_path_for(&artifact)).unwrap();
    assert_eq!(sidecar.codebook_size, 3);
    assert_eq!(sidecar.max_iterations, 7);
    assert_eq!(sidecar.seed, 99);
}

#[test]
fn test_container_format_from_config() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml("c.yaml", "artifact:\n  format: container\n");

    let config = AppConfig::load(Some(&config_path)).unwrap();
    assert_eq!(config.artifact.format, ArtifactFormat::Container);
    assert_eq!(config.compression.codebook_size, 4);
}

#[test]
fn test_negative_codebook_size_is_invalid_configuration() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml("bad.yaml", "compression:\n  codebook_size: -2\n");
    let input = ws.gray_png("in.png", &gradient(4, 1));

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let err = CompressionPipeline::new(config)
        .compress(&input, &ws.path("out.vq"), None)
        .unwrap_err();

    match err {
        AppError::Codec(VqError::InvalidConfiguration(msg)) => {
            assert!(msg.contains("-2"), "message was {msg}")
        }
        other => panic!("Expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn test_oversized_codebook_is_invalid_configuration() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml("huge.yaml", "compression:\n  codebook_size: 4000000000\n");
    let input = ws.gray_png("in.png", &gradient(4, 1));

    let config = AppConfig::load(Some(&config_path)).unwrap();
    let err = CompressionPipeline::new(config)
        .compress(&input, &ws.path("out.vq"), None)
        .unwrap_err();

    assert!(
        matches!(err, AppError::Codec(VqError::InvalidConfiguration(_))),
        "got {err:?}"
    );
    assert!(!ws.path("out.vq").exists());
}

#[test]
fn test_explicit_missing_config_is_an_error() {
    let ws = Workspace::new();
    let err = AppConfig::load(Some(&ws.path("absent.yaml"))).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let ws = Workspace::new();
    let config_path = ws.write_yaml("broken.yaml", "compression: [1, 2\n");
    assert!(matches!(
        AppConfig::load(Some(&config_path)),
        Err(AppError::Config(_))
    ));
}
