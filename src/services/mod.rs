//! Services Layer
//!
//! This module contains pure business logic extracted from HTTP handlers.
//! Every service takes the store handle explicitly; none of them hold global state.

pub mod auto_service;
pub mod client_service;
pub mod order_service;
pub mod overview_service;
pub mod reference_guard;
pub mod sale_service;

// Re-export for convenience
pub use order_service::{OrderDetail, OrderSummary};
pub use sale_service::{SaleReceipt, SaleReport, SalesStatistics};
