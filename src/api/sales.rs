use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::domain::DomainError;
use crate::services::sale_service;

/// GET /api/sales - List sales by ascending id
#[utoipa::path(
    get,
    path = "/api/sales",
    responses(
        (status = 200, description = "All sales by ascending id")
    )
)]
pub async fn list_sales(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let sales = sale_service::list_sales(&db).await?;
    Ok(Json(json!({
        "sales": sales,
        "count": sales.len()
    })))
}

/// GET /api/sales/:id/report - Buyer and every auto of a sale
#[utoipa::path(
    get,
    path = "/api/sales/{id}/report",
    params(("id" = i32, Path, description = "Sale id")),
    responses(
        (status = 200, description = "Sale with its client and sold autos"),
        (status = 404, description = "Sale not found")
    )
)]
pub async fn get_sale_report(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let report = sale_service::get_sale_report(&db, id).await?;
    Ok(Json(json!({ "report": report })))
}

/// GET /api/sales/statistics - Sale count and revenue
#[utoipa::path(
    get,
    path = "/api/sales/statistics",
    responses(
        (status = 200, description = "Sale count and revenue")
    )
)]
pub async fn get_sales_statistics(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let stats = sale_service::sales_statistics(&db).await?;
    Ok(Json(stats))
}
