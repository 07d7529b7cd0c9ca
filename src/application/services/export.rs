//! JSON export of the phases
//!
//! Produces a pretty-printed document of the same shape the persistence
//! adapter stores, for download or backup.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::Phase;
use crate::infrastructure::traits::FileSystem;

/// Default file name of an export.
pub const DEFAULT_EXPORT_FILE: &str = "wishlist.json";

/// Service writing read-only snapshots of the phases.
pub struct ExportService {
    fs: Arc<dyn FileSystem>,
}

impl ExportService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Render the phases as an indented JSON array.
    pub fn to_json(phases: &[Phase]) -> ApplicationResult<String> {
        Ok(serde_json::to_string_pretty(phases)?)
    }

    /// Write the export document to `path`, creating parent directories.
    #[instrument(level = "debug", skip(self, phases))]
    pub fn write(&self, phases: &[Phase], path: &Path) -> ApplicationResult<()> {
        let json = Self::to_json(phases)?;
        self.fs
            .ensure_parent(path)
            .with_path_context("create export directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write export", path)?;
        debug!("write: {} phase(s) to {}", phases.len(), path.display());
        Ok(())
    }
}
