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
use crate::models::AutoInput;
use crate::services::auto_service;

#[utoipa::path(
    get,
    path = "/api/autos",
    responses(
        (status = 200, description = "All autos by ascending id")
    )
)]
pub async fn list_autos(
    State(db): State<DatabaseConnection>,
) -> Result<impl IntoResponse, DomainError> {
    let autos = auto_service::list_autos(&db).await?;
    Ok(Json(json!({
        "autos": autos,
        "total": autos.len()
    })))
}

#[utoipa::path(
    get,
    path = "/api/autos/{id}",
    params(("id" = i32, Path, description = "Auto id")),
    responses(
        (status = 200, description = "Auto found"),
        (status = 404, description = "Auto not found")
    )
)]
pub async fn get_auto(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    let auto = auto_service::get_auto(&db, id).await?;
    Ok(Json(json!({ "auto": auto })))
}

#[utoipa::path(
    post,
    path = "/api/autos",
    responses(
        (status = 201, description = "Auto registered"),
        (status = 400, description = "Invalid field or body"),
        (status = 409, description = "Code already used")
    )
)]
pub async fn create_auto(
    State(db): State<DatabaseConnection>,
    ApiJson(payload): ApiJson<AutoInput>,
) -> Result<impl IntoResponse, DomainError> {
    let auto = auto_service::register_auto(&db, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "auto": auto
        })),
    ))
}

#[utoipa::path(
    put,
    path = "/api/autos/{id}",
    params(("id" = i32, Path, description = "Auto id")),
    responses(
        (status = 200, description = "Auto updated"),
        (status = 400, description = "Invalid field or body"),
        (status = 404, description = "Auto not found"),
        (status = 409, description = "Code already used")
    )
)]
pub async fn update_auto(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    ApiJson(payload): ApiJson<AutoInput>,
) -> Result<impl IntoResponse, DomainError> {
    let auto = auto_service::update_auto(&db, id, payload).await?;
    Ok(Json(json!({
        "success": true,
        "auto": auto
    })))
}

#[utoipa::path(
    delete,
    path = "/api/autos/{id}",
    params(("id" = i32, Path, description = "Auto id")),
    responses(
        (status = 200, description = "Auto deleted"),
        (status = 404, description = "Auto not found"),
        (status = 409, description = "Auto is part of an order")
    )
)]
pub async fn delete_auto(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, DomainError> {
    auto_service::delete_auto(&db, id).await?;
    Ok(Json(json!({ "success": true })))
}
