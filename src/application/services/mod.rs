//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (KeyValueStore, FileSystem)
//! but are themselves concrete structs, not traits.

mod export;
mod persistence;
mod wishlist;

pub use export::{ExportService, DEFAULT_EXPORT_FILE};
pub use persistence::{PersistenceService, DEFAULT_PHASES_KEY, DEFAULT_THEME_KEY};
pub use wishlist::{Change, ChangeObserver, WishlistService};
