use axum::{Json, extract::State, response::IntoResponse};
use sea_orm::DatabaseConnection;

use crate::domain::DomainError;
use crate::services::overview_service;

/// GET /api/tables - every table, for development
#[utoipa::path(
    get,
    path = "/api/tables",
    responses(
        (status = 200, description = "Every table by ascending id")
    )
)]
pub async fn dump_tables(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let tables = overview_service::dump_tables(&db).await?;
    Ok(Json(tables))
}
