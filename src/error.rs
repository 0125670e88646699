//! Error types for distpack
//!
//! Uses `thiserror` for library errors; the command layer wraps these in
//! `anyhow` for reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for distpack operations
pub type DistpackResult<T> = Result<T, DistpackError>;

/// Main error type for distpack operations
#[derive(Error, Debug)]
pub enum DistpackError {
    /// Manifest file does not exist
    #[error("manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest failed to deserialize
    #[error("invalid manifest {file}: {message}")]
    InvalidManifest { file: PathBuf, message: String },

    /// A packaged input (script, template, help directory) is missing
    #[error("{role} not found: {path}")]
    MissingInput { role: &'static str, path: PathBuf },

    /// Version template is not valid UTF-8
    #[error("version template {path} is not valid UTF-8")]
    NonUtf8Template { path: PathBuf },

    /// Git metadata capture failed
    #[error("git metadata unavailable: {message}")]
    Git { message: String },

    /// Commit time was not ISO-8601
    #[error("unparseable commit time '{value}'")]
    CommitTime { value: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
