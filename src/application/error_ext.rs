//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with key/path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Attach the storage key to a failed read or write.
    ///
    /// # Example
    /// ```ignore
    /// self.store.set(&self.phases_key, &json)
    ///     .with_key_context(&self.phases_key)?;
    /// ```
    fn with_key_context(self, key: &str) -> ApplicationResult<T>;

    /// Add path context to an I/O error.
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_key_context(self, key: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::StorageUnavailable {
            key: key.to_string(),
            source: e,
        })
    }

    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}
