pub mod autos;
pub mod clients;
pub mod extract;
pub mod health;
pub mod orders;
pub mod sales;
pub mod tables;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Clients
        .route(
            "/clients",
            get(clients::list_clients).post(clients::create_client),
        )
        .route(
            "/clients/:id",
            get(clients::get_client)
                .put(clients::update_client)
                .delete(clients::delete_client),
        )
        // Autos
        .route("/autos", get(autos::list_autos).post(autos::create_auto))
        .route(
            "/autos/:id",
            get(autos::get_auto)
                .put(autos::update_auto)
                .delete(autos::delete_auto),
        )
        // Orders
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route(
            "/orders/:id",
            get(orders::get_order).delete(orders::delete_order),
        )
        .route("/orders/:id/entries", post(orders::add_entry))
        .route(
            "/orders/:id/entries/:auto_id",
            delete(orders::remove_entry),
        )
        .route("/orders/:id/complete", post(orders::complete_order))
        // Sales
        .route("/sales", get(sales::list_sales))
        .route("/sales/statistics", get(sales::get_sales_statistics))
        .route("/sales/:id/report", get(sales::get_sale_report))
        // Dev overview
        .route("/tables", get(tables::dump_tables))
        .with_state(state)
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match &self {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Conflict(_) | DomainError::ReferentialConflict { .. } => {
                StatusCode::CONFLICT
            }
            DomainError::InvalidState(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DomainError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut body = json!({
            "success": false,
            "kind": self.kind(),
            "error": self.to_string(),
        });
        if let DomainError::ReferentialConflict {
            blocking_order_ids, ..
        } = &self
        {
            body["blocking_order_ids"] = json!(blocking_order_ids);
        }

        (status, Json(body)).into_response()
    }
}
