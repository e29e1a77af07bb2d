//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attach the path the I/O operation worked on.
    ///
    /// # Example
    /// ```ignore
    /// let content = std::fs::read_to_string(path).with_path_context(path)?;
    /// ```
    fn with_path_context(self, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
