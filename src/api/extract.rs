//! Request extractors that report failures through `DomainError`

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::domain::DomainError;

/// `axum::Json` whose rejections become validation errors, so malformed
/// bodies get the same error envelope and status as rejected field values.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        DomainError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}
