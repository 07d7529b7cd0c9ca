//! Identity generation for new entities

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::EntityId;

/// Source of fresh entity ids.
///
/// Ids must be unique for the lifetime of the process; collisions are
/// not detected.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> EntityId;
}

/// Random UUID v4 ids. Default for real sessions.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> EntityId {
        EntityId::new(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter prefixed with a session salt: `<salt>-<n>`.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    salt: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            counter: AtomicU64::new(0),
        }
    }

    /// Salted with a random UUID fragment.
    pub fn with_random_salt() -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self::new(&salt[..8])
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> EntityId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        EntityId::new(format!("{}-{}", self.salt, n))
    }
}
