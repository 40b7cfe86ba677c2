//! Order Service - lifecycle of an order from creation to sale conversion
//!
//! An order is `Open` until a sale is recorded for it, then `Completed` for good.
//! Each mutating operation runs as a single transaction: it either applies fully
//! or leaves every row as it was.

use sea_orm::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::{DomainError, EntityKind, OrderState};
use crate::models::auto::{self, Entity as Auto};
use crate::models::client::{self, Entity as Client};
use crate::models::order::{self, Entity as Order};
use crate::models::order_entry::{self, Entity as OrderEntry};
use crate::models::sale::{self, Entity as Sale};
use crate::services::auto_service::find_auto;
use crate::services::sale_service::{self, SaleReceipt};

/// Order with its lifecycle state, for listings
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    #[serde(flatten)]
    pub order: order::Model,
    pub state: OrderState,
    pub entry_count: u64,
}

/// Everything needed to show one order
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    pub order: order::Model,
    pub client: client::Model,
    pub primary_auto: auto::Model,
    /// Autos added through entries, in insertion order
    pub added_autos: Vec<auto::Model>,
    pub state: OrderState,
    pub entry_count: u64,
}

pub(crate) async fn find_order<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<order::Model, DomainError> {
    Order::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Order, id))
}

/// Current lifecycle state of an existing order
pub async fn order_state<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
) -> Result<OrderState, DomainError> {
    let sales = Sale::find()
        .filter(sale::Column::OrderId.eq(order_id))
        .count(conn)
        .await?;
    Ok(OrderState::from_sale_exists(sales > 0))
}

async fn require_open<C: ConnectionTrait>(
    conn: &C,
    order_id: i32,
    action: &str,
) -> Result<(), DomainError> {
    if order_state(conn, order_id).await?.is_open() {
        return Ok(());
    }
    tracing::warn!("Cannot {} order #{}: already completed", action, order_id);
    Err(DomainError::InvalidState(format!(
        "Cannot {} order #{}: the order is already completed",
        action, order_id
    )))
}

async fn count_entries<C: ConnectionTrait>(conn: &C, order_id: i32) -> Result<u64, DomainError> {
    let count = OrderEntry::find()
        .filter(order_entry::Column::OrderId.eq(order_id))
        .count(conn)
        .await?;
    Ok(count)
}

/// List all orders by ascending id, each tagged with its state
pub async fn list_orders(db: &DatabaseConnection) -> Result<Vec<OrderSummary>, DomainError> {
    let orders = Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;

    let sold: HashSet<i32> = Sale::find()
        .select_only()
        .column(sale::Column::OrderId)
        .into_tuple::<i32>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    let entry_order_ids: Vec<i32> = OrderEntry::find()
        .select_only()
        .column(order_entry::Column::OrderId)
        .into_tuple()
        .all(db)
        .await?;

    let mut entry_counts: HashMap<i32, u64> = HashMap::new();
    for order_id in entry_order_ids {
        *entry_counts.entry(order_id).or_insert(0) += 1;
    }

    Ok(orders
        .into_iter()
        .map(|order| OrderSummary {
            state: OrderState::from_sale_exists(sold.contains(&order.id)),
            entry_count: entry_counts.get(&order.id).copied().unwrap_or(0),
            order,
        })
        .collect())
}

/// Load an order with its client, primary auto and added autos
pub async fn get_order_detail(
    db: &DatabaseConnection,
    id: i32,
) -> Result<OrderDetail, DomainError> {
    let order = find_order(db, id).await?;

    let client = Client::find_by_id(order.client_id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, order.client_id))?;
    let primary_auto = find_auto(db, order.auto_id).await?;

    let entries = OrderEntry::find()
        .filter(order_entry::Column::OrderId.eq(id))
        .order_by_asc(order_entry::Column::Id)
        .all(db)
        .await?;

    let auto_ids: Vec<i32> = entries.iter().map(|e| e.auto_id).collect();
    let mut autos_by_id: HashMap<i32, auto::Model> = HashMap::new();
    if !auto_ids.is_empty() {
        for auto in Auto::find()
            .filter(auto::Column::Id.is_in(auto_ids))
            .all(db)
            .await?
        {
            autos_by_id.insert(auto.id, auto);
        }
    }

    let added_autos = entries
        .iter()
        .filter_map(|e| autos_by_id.get(&e.auto_id).cloned())
        .collect();

    Ok(OrderDetail {
        state: order_state(db, id).await?,
        entry_count: entries.len() as u64,
        order,
        client,
        primary_auto,
        added_autos,
    })
}

/// Create an open order for an existing client and primary auto
pub async fn create_order(
    db: &DatabaseConnection,
    client_id: i32,
    auto_id: i32,
) -> Result<order::Model, DomainError> {
    let txn = db.begin().await?;

    Client::find_by_id(client_id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, client_id))?;
    find_auto(&txn, auto_id).await?;

    let new_order = order::ActiveModel {
        client_id: Set(client_id),
        auto_id: Set(auto_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };

    let saved = new_order.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        "Created order #{} for client #{} with auto #{}",
        saved.id,
        client_id,
        auto_id
    );
    Ok(saved)
}

/// Attach one more auto to an open order. The same auto may be added repeatedly.
/// Returns the number of entries on the order afterwards.
pub async fn add_entry(
    db: &DatabaseConnection,
    order_id: i32,
    auto_id: i32,
) -> Result<u64, DomainError> {
    let txn = db.begin().await?;

    find_order(&txn, order_id).await?;
    require_open(&txn, order_id, "add an auto to").await?;
    find_auto(&txn, auto_id).await?;

    let entry = order_entry::ActiveModel {
        order_id: Set(order_id),
        auto_id: Set(auto_id),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    };
    entry.insert(&txn).await?;

    let count = count_entries(&txn, order_id).await?;
    txn.commit().await?;

    tracing::info!(
        "Added auto #{} to order #{} ({} entries)",
        auto_id,
        order_id,
        count
    );
    Ok(count)
}

/// Detach one entry holding `auto_id` from an open order.
/// When the auto was added several times, the oldest entry goes first.
/// Returns the number of entries left.
pub async fn remove_entry(
    db: &DatabaseConnection,
    order_id: i32,
    auto_id: i32,
) -> Result<u64, DomainError> {
    let txn = db.begin().await?;

    find_order(&txn, order_id).await?;
    require_open(&txn, order_id, "remove an auto from").await?;

    let entry = OrderEntry::find()
        .filter(order_entry::Column::OrderId.eq(order_id))
        .filter(order_entry::Column::AutoId.eq(auto_id))
        .order_by_asc(order_entry::Column::Id)
        .one(&txn)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound(format!(
                "Order #{} has no entry for auto #{}",
                order_id, auto_id
            ))
        })?;

    OrderEntry::delete_by_id(entry.id).exec(&txn).await?;

    let count = count_entries(&txn, order_id).await?;
    txn.commit().await?;

    tracing::info!(
        "Removed auto #{} from order #{} ({} entries left)",
        auto_id,
        order_id,
        count
    );
    Ok(count)
}

/// Delete an open order together with all of its entries.
/// Entries and order go in the same transaction; on failure nothing is removed.
pub async fn delete_order(db: &DatabaseConnection, order_id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    find_order(&txn, order_id).await?;
    require_open(&txn, order_id, "delete").await?;

    let removed = OrderEntry::delete_many()
        .filter(order_entry::Column::OrderId.eq(order_id))
        .exec(&txn)
        .await?
        .rows_affected;

    Order::delete_by_id(order_id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted order #{} and {} entries", order_id, removed);
    Ok(())
}

/// Complete an open order: record its sale with the aggregated cost.
/// Fails with `InvalidState` if the order already has a sale.
pub async fn complete_order(
    db: &DatabaseConnection,
    order_id: i32,
) -> Result<SaleReceipt, DomainError> {
    let txn = db.begin().await?;

    let order = find_order(&txn, order_id).await?;
    require_open(&txn, order_id, "complete").await?;

    let receipt = sale_service::convert_order(&txn, &order).await?;
    txn.commit().await?;

    tracing::info!(
        "Completed order #{}: sale #{} for {} ({} autos)",
        order_id,
        receipt.sale.id,
        receipt.sale.total_cost,
        receipt.entries.len()
    );
    Ok(receipt)
}
