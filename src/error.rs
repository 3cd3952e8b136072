//! Error types
//!
//! `HashError` is local to a single artifact and is always recovered by the scanner.
//! `StorageError` covers baseline persistence. `ApiError` is what the orchestrator and
//! the CLI surface to the operator.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to hash one file or device.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is smaller than the requested {expected} bytes (got {actual})")]
    TooSmall {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

/// Baseline storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Errors escalated to the operator.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No hashes collected: all {targets} boot targets present were unreadable")]
    HashCollectionFailed { targets: usize },

    #[error("No boot surface found: none of the expected boot targets exist")]
    NoBootSurface,

    #[error("Failed to persist baseline: {0}")]
    BaselinePersistFailed(#[source] StorageError),

    #[error("Baseline missing or empty: {path}")]
    BaselineMissing { path: PathBuf },
}

impl ApiError {
    /// Stable machine-readable code used in the status line.
    pub fn status_code(&self) -> &'static str {
        match self {
            ApiError::ConfigError(_) => "config_error",
            ApiError::HashCollectionFailed { .. } => "hash_failed",
            ApiError::NoBootSurface => "no_boot_surface",
            ApiError::BaselinePersistFailed(_) => "save_failed",
            ApiError::BaselineMissing { .. } => "baseline_missing",
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
