//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! The HTTP layer maps each kind to a status code.

use sea_orm::{DbErr, SqlErr};

use super::lifecycle::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed input, rejected before any write
    #[error("{0}")]
    Validation(String),
    /// Uniqueness violation on write
    #[error("{0}")]
    Conflict(String),
    /// Referenced id is absent
    #[error("{0}")]
    NotFound(String),
    /// Operation not legal for the current lifecycle state
    #[error("{0}")]
    InvalidState(String),
    /// Delete blocked by dependent orders
    #[error(
        "Cannot delete {entity} #{id}: referenced by orders {}",
        join_ids(.blocking_order_ids)
    )]
    ReferentialConflict {
        entity: EntityKind,
        id: i32,
        blocking_order_ids: Vec<i32>,
    },
    /// Underlying store failed for infrastructure reasons
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        DomainError::NotFound(format!("{} #{} not found", entity, id))
    }

    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::Conflict(_) => "conflict_error",
            DomainError::NotFound(_) => "not_found",
            DomainError::InvalidState(_) => "invalid_state",
            DomainError::ReferentialConflict { .. } => "referential_conflict",
            DomainError::Persistence(_) => "persistence_failure",
        }
    }
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ")
}

// Conversion from SeaORM errors (used in services)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => DomainError::Persistence(e.to_string()),
        }
    }
}
