//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies (no Axum).
//! Only lifecycle vocabulary, validators and domain error types.

pub mod errors;
pub mod lifecycle;
pub mod validation;

pub use errors::DomainError;
pub use lifecycle::{DeleteDecision, EntityKind, OrderState};
pub use validation::{ValidAuto, ValidClient, validate_auto, validate_client};
