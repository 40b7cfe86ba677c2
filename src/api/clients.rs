use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::extract::ApiJson;
use crate::domain::DomainError;
use crate::models::ClientInput;
use crate::services::client_service;

#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "All clients by ascending id")
    )
)]
pub async fn list_clients(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let clients = client_service::list_clients(&db).await?;
    Ok(Json(json!({
        "clients": clients,
        "total": clients.len()
    })))
}

#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client found"),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let client = client_service::get_client(&db, id).await?;
    Ok(Json(json!({ "client": client })))
}

#[utoipa::path(
    post,
    path = "/api/clients",
    responses(
        (status = 201, description = "Client registered"),
        (status = 400, description = "Phone or code is not numeric"),
        (status = 409, description = "Phone or code already registered")
    )
)]
pub async fn create_client(
    State(db): State<DatabaseConnection>,
    ApiJson(payload): ApiJson<ClientInput>,
) -> Result<impl IntoResponse, DomainError> {
    let client = client_service::register_client(&db, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "client": client
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client updated"),
        (status = 400, description = "Invalid field or body"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Phone or code already registered")
    )
)]
pub async fn update_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<ClientInput>,
) -> Result<impl IntoResponse, DomainError> {
    let client = client_service::update_client(&db, id, payload).await?;
    Ok(Json(json!({
        "success": true,
        "client": client
    })))
}

#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = i32, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client deleted"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Client still has orders")
    )
)]
pub async fn delete_client(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    client_service::delete_client(&db, id).await?;
    Ok(Json(json!({ "success": true })))
}
