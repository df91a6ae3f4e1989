//! Error types for crawl-sep core operations.
//!
//! This module defines the error types used throughout the `crawlsep-core` crate.

use std::path::PathBuf;

use thiserror::Error;

use crate::shape::ShapeError;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, validating or writing policies.
#[derive(Error, Debug)]
pub enum Error {
    /// Policy file could not be read.
    #[error("Failed to load policy from {}: {source}", .path.display())]
    PolicyLoad {
        /// Path to the policy file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Policy file could not be written.
    #[error("Failed to write policy to {}: {source}", .path.display())]
    PolicyWrite {
        /// Path to the policy file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Policy document is not valid JSON.
    #[error("Failed to parse policy: {0}")]
    PolicyParse(#[from] serde_json::Error),

    /// Policy document does not have the expected shape.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// No policy path was supplied.
    #[error("Policy path required.")]
    MissingPath,

    /// The working directory could not be determined.
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}
