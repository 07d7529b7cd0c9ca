//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{ExportService, PersistenceService, WishlistService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{IdGenerator, UuidIdGenerator};
use crate::infrastructure::traits::{
    FileKeyValueStore, FileSystem, KeyValueStore, MemoryKeyValueStore, RealFileSystem,
};

/// Container holding the shared dependencies of all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Durable key-value store holding the wishlist
    pub kv: Arc<dyn KeyValueStore>,

    /// Source of new entity ids
    pub ids: Arc<dyn IdGenerator>,
}

impl ServiceContainer {
    /// Create a container backed by files under `settings.data_dir`.
    pub fn new(settings: Settings) -> Self {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let kv = Arc::new(FileKeyValueStore::with_fs(settings.data_dir.clone(), fs.clone()));
        Self::with_deps(settings, fs, kv, Arc::new(UuidIdGenerator))
    }

    /// Create a container whose wishlist lives only in memory.
    pub fn ephemeral(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(MemoryKeyValueStore::new()),
            Arc::new(UuidIdGenerator),
        )
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        kv: Arc<dyn KeyValueStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            kv,
            ids,
        }
    }

    pub fn persistence(&self) -> PersistenceService {
        PersistenceService::with_keys(
            self.kv.clone(),
            self.settings.phases_key.clone(),
            self.settings.theme_key.clone(),
        )
    }

    pub fn export(&self) -> ExportService {
        ExportService::new(self.fs.clone())
    }

    /// Load the stored wishlist and open a session on it.
    pub fn wishlist(&self) -> ApplicationResult<WishlistService> {
        WishlistService::open(self.persistence(), self.ids.clone())
    }
}
