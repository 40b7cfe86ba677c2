//! Sale Service - converts completed orders into sales and reports on them
//!
//! A sale is written once, when its order completes, and never changes afterwards.

use chrono::Utc;
use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::{DomainError, EntityKind};
use crate::models::auto::{self, Entity as Auto};
use crate::models::client::{self, Entity as Client};
use crate::models::order::{self, Entity as Order};
use crate::models::order_entry::{self, Entity as OrderEntry};
use crate::models::sale::{self, Entity as Sale};
use crate::models::sale_entry::{self, Entity as SaleEntry};

/// Result of completing an order
#[derive(Debug, Clone, Serialize)]
pub struct SaleReceipt {
    pub sale: sale::Model,
    /// Primary auto first, then one row per order entry in insertion order
    pub entries: Vec<sale_entry::Model>,
}

/// A sale with its buyer and the autos sold, in the order they were recorded
#[derive(Debug, Clone, Serialize)]
pub struct SaleReport {
    pub sale: sale::Model,
    pub client: client::Model,
    pub autos: Vec<auto::Model>,
}

/// Response for sale statistics
#[derive(Debug, Clone, Serialize)]
pub struct SalesStatistics {
    pub total_sales: u64,
    pub autos_sold: u64,
    pub total_revenue: f64,
    pub average_sale: f64,
}

/// Total cost of an order: primary auto plus every added auto
pub fn sale_total(primary_price: f64, entry_prices: impl IntoIterator<Item = f64>) -> f64 {
    primary_price + entry_prices.into_iter().sum::<f64>()
}

/// Materialize the sale of an order.
///
/// Must run inside the caller's transaction after the order was checked to be open.
/// The unique index on `sales.order_id` still rejects a second sale if two
/// completions race; that surfaces as `InvalidState`.
pub(crate) async fn convert_order<C: ConnectionTrait>(
    conn: &C,
    order: &order::Model,
) -> Result<SaleReceipt, DomainError> {
    let primary = Auto::find_by_id(order.auto_id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Auto, order.auto_id))?;

    let entries = OrderEntry::find()
        .filter(order_entry::Column::OrderId.eq(order.id))
        .order_by_asc(order_entry::Column::Id)
        .all(conn)
        .await?;

    let mut prices: HashMap<i32, f64> = HashMap::new();
    if !entries.is_empty() {
        let auto_ids: Vec<i32> = entries.iter().map(|e| e.auto_id).collect();
        for auto in Auto::find()
            .filter(auto::Column::Id.is_in(auto_ids))
            .all(conn)
            .await?
        {
            prices.insert(auto.id, auto.price);
        }
    }

    let mut sold_auto_ids = Vec::with_capacity(entries.len() + 1);
    sold_auto_ids.push(primary.id);
    let mut entry_prices = Vec::with_capacity(entries.len());
    for entry in &entries {
        let price = prices
            .get(&entry.auto_id)
            .copied()
            .ok_or_else(|| DomainError::not_found(EntityKind::Auto, entry.auto_id))?;
        entry_prices.push(price);
        sold_auto_ids.push(entry.auto_id);
    }

    let total = sale_total(primary.price, entry_prices);
    let now = Utc::now();

    let new_sale = sale::ActiveModel {
        order_id: Set(order.id),
        total_cost: Set(total),
        sale_date: Set(now.format("%Y-%m-%d").to_string()),
        created_at: Set(now.to_rfc3339()),
        ..Default::default()
    };

    let sale = new_sale.insert(conn).await.map_err(|e| {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = e.sql_err() {
            DomainError::InvalidState(format!("Order #{} is already completed", order.id))
        } else {
            DomainError::from(e)
        }
    })?;

    let mut sale_entries = Vec::with_capacity(sold_auto_ids.len());
    for auto_id in sold_auto_ids {
        let entry = sale_entry::ActiveModel {
            sale_id: Set(sale.id),
            auto_id: Set(auto_id),
            ..Default::default()
        };
        sale_entries.push(entry.insert(conn).await?);
    }

    Ok(SaleReceipt {
        sale,
        entries: sale_entries,
    })
}

/// List all sales by ascending id
pub async fn list_sales(db: &DatabaseConnection) -> Result<Vec<sale::Model>, DomainError> {
    let sales = Sale::find()
        .order_by_asc(sale::Column::Id)
        .all(db)
        .await?;
    Ok(sales)
}

/// Build the report of one sale: buyer plus every auto sold
pub async fn get_sale_report(
    db: &DatabaseConnection,
    sale_id: i32,
) -> Result<SaleReport, DomainError> {
    let sale = Sale::find_by_id(sale_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Sale, sale_id))?;

    let order = Order::find_by_id(sale.order_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Order, sale.order_id))?;

    let client = Client::find_by_id(order.client_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, order.client_id))?;

    let entries_with_autos = SaleEntry::find()
        .filter(sale_entry::Column::SaleId.eq(sale_id))
        .order_by_asc(sale_entry::Column::Id)
        .find_also_related(Auto)
        .all(db)
        .await?;

    let mut autos = Vec::with_capacity(entries_with_autos.len());
    for (entry, auto) in entries_with_autos {
        autos.push(auto.ok_or_else(|| DomainError::not_found(EntityKind::Auto, entry.auto_id))?);
    }

    Ok(SaleReport {
        sale,
        client,
        autos,
    })
}

/// Count sales and aggregate revenue
pub async fn sales_statistics(db: &DatabaseConnection) -> Result<SalesStatistics, DomainError> {
    let sales = Sale::find().all(db).await?;
    let autos_sold = SaleEntry::find().count(db).await?;

    let total_sales = sales.len() as u64;
    let total_revenue: f64 = sales.iter().map(|s| s.total_cost).sum();
    let average_sale = if total_sales == 0 {
        0.0
    } else {
        total_revenue / total_sales as f64
    };

    Ok(SalesStatistics {
        total_sales,
        autos_sold,
        total_revenue,
        average_sale,
    })
}
