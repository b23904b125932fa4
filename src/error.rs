//! Error types for pyprep operations.
//!
//! This module defines [`PyprepError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Malformed manifest lines are never errors; the reconciler passes them
//!   through to the installer instead
//! - Manifest retrieval and installer failures are fatal and stop the run
//! - Use `anyhow::Error` (via `PyprepError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pyprep operations.
#[derive(Debug, Error)]
pub enum PyprepError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Local requirements manifest does not exist.
    #[error("Requirements manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Remote requirements manifest could not be retrieved.
    #[error("Failed to fetch requirements manifest from {url}: {message}")]
    ManifestFetchFailed { url: String, message: String },

    /// Python interpreter could not be found or launched.
    #[error("Python interpreter not found: {path}")]
    PythonNotFound { path: PathBuf },

    /// The interpreter ran but its environment report was unusable.
    #[error("Failed to inspect Python environment: {message}")]
    ProbeFailed { message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for pyprep operations.
pub type Result<T> = std::result::Result<T, PyprepError>;
