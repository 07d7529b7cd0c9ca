//! Domain-level errors (no external dependencies)

use std::fmt;

use thiserror::Error;

use crate::domain::EntityId;

/// Level of the hierarchy an id was expected to resolve at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Phase,
    Section,
    Item,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phase => "phase",
            Self::Section => "section",
            Self::Item => "item",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain errors represent business logic violations.
/// The hierarchy is left untouched whenever one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("index {index} out of range for {len} element(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl DomainError {
    pub fn not_found(kind: EntityKind, id: &EntityId) -> Self {
        Self::NotFound {
            kind,
            id: id.clone(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
