//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod id;
pub mod reorder;
pub mod store;

pub use entities::*;
pub use error::{DomainError, DomainResult, EntityKind};
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use reorder::move_element;
pub use store::HierarchyStore;
