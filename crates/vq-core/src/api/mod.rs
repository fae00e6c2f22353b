//! Public API for the vq-core crate.
//!
//! This module provides the high-level API: the [`VqCompressor`] builder,
//! the [`VqConfig`] shared by both directions, and the [`VqError`] unified
//! error type.

mod compressor;
mod config;
mod error;

pub use compressor::{Compressed, VqCompressor};
pub use config::VqConfig;
pub use error::VqError;
