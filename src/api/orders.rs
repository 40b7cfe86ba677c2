use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::extract::ApiJson;
use crate::domain::DomainError;
use crate::models::CreateOrderInput;
use crate::services::order_service;

/// Request body for attaching an auto to an order
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub auto_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/orders",
    responses(
        (status = 200, description = "All orders by ascending id with their state")
    )
)]
pub async fn list_orders(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let orders = order_service::list_orders(&db).await?;
    Ok(Json(json!({
        "orders": orders,
        "total": orders.len()
    })))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order with client, autos and state"),
        (status = 404, description = "Order not found")
    )
)]
pub async fn get_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let detail = order_service::get_order_detail(&db, id).await?;
    Ok(Json(json!({ "order": detail })))
}

#[utoipa::path(
    post,
    path = "/api/orders",
    responses(
        (status = 201, description = "Open order created"),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "Client or auto not found")
    )
)]
pub async fn create_order(
    State(db): State<DatabaseConnection>,
    ApiJson(payload): ApiJson<CreateOrderInput>,
) -> Result<impl IntoResponse, DomainError> {
    let order = order_service::create_order(&db, payload.client_id, payload.auto_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "order": order
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order and its entries deleted"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Order already completed")
    )
)]
pub async fn delete_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    order_service::delete_order(&db, id).await?;
    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/entries",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 201, description = "Auto added, returns the entry count"),
        (status = 400, description = "Invalid body"),
        (status = 404, description = "Order or auto not found"),
        (status = 422, description = "Order already completed")
    )
)]
pub async fn add_entry(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AddEntryRequest>,
) -> Result<impl IntoResponse, DomainError> {
    let entry_count = order_service::add_entry(&db, id, payload.auto_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "entry_count": entry_count
        })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/orders/{id}/entries/{auto_id}",
    params(
        ("id" = i32, Path, description = "Order id"),
        ("auto_id" = i32, Path, description = "Auto id")
    ),
    responses(
        (status = 200, description = "One entry removed, returns the entry count"),
        (status = 404, description = "Order or entry not found"),
        (status = 422, description = "Order already completed")
    )
)]
pub async fn remove_entry(
    State(db): State<DatabaseConnection>,
    Path((id, auto_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, DomainError> {
    let entry_count = order_service::remove_entry(&db, id, auto_id).await?;
    Ok(Json(json!({
        "success": true,
        "entry_count": entry_count
    })))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/complete",
    params(("id" = i32, Path, description = "Order id")),
    responses(
        (status = 201, description = "Sale recorded for the order"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Order already completed")
    )
)]
pub async fn complete_order(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let receipt = order_service::complete_order(&db, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "sale": receipt.sale,
            "entries": receipt.entries
        })),
    ))
}
