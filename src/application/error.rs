//! Application-level errors (input files, configuration)

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: everything that can fail around the infallible domain layer.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported input format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("invalid input in {path}: {message}")]
    InvalidInput { path: PathBuf, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
