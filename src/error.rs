use std::path::PathBuf;

use thiserror::Error;
use vq_core::VqError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Codec error: {0}")]
    Codec(#[from] VqError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Sidecar error: {0}")]
    Sidecar(String),

    #[error("No codebook sidecar found at {}", .0.display())]
    MissingSidecar(PathBuf),

    #[error("Artifact checksum mismatch: sidecar expects {expected}, artifact is {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Sidecar(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),

    #[error("Image dimensions too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<png::DecodingError> for ImageError {
    fn from(e: png::DecodingError) -> Self {
        match e {
            png::DecodingError::IoError(io) => ImageError::Io(io),
            other => ImageError::PngDecode(other.to_string()),
        }
    }
}

impl From<png::EncodingError> for ImageError {
    fn from(e: png::EncodingError) -> Self {
        match e {
            png::EncodingError::IoError(io) => ImageError::Io(io),
            other => ImageError::PngEncode(other.to_string()),
        }
    }
}
