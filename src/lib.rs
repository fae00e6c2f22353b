//! vqpress - codebook compression for grayscale images
//!
//! Command-line front end for `vq_core`: PNG input and output, YAML
//! configuration, and the JSON codebook sidecar that raw artifacts need.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
