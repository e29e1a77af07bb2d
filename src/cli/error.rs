//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Io { source, .. }
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    crate::exitcode::NOINPUT
                }
                ApplicationError::Io { .. } => crate::exitcode::IOERR,
                ApplicationError::Parse { .. } | ApplicationError::InvalidInput { .. } => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::UnsupportedFormat(_) => crate::exitcode::USAGE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}
