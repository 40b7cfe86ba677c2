//! Referential Guard - decides whether a client or auto may be deleted
//!
//! Read-only: callers run it inside the same transaction as the delete so the
//! decision cannot go stale between check and write.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect};

use crate::domain::{DeleteDecision, DomainError, EntityKind};
use crate::models::order::{self, Entity as Order};
use crate::models::order_entry::{self, Entity as OrderEntry};

/// Check whether an entity can be deleted
///
/// - Client: blocked by every order placed by the client
/// - Auto: blocked by every order using it as primary auto or holding it in an entry
///
/// Orders and sales are never deleted through this guard and always get `Allowed`.
pub async fn can_delete<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<DeleteDecision, DomainError> {
    let blocking = match kind {
        EntityKind::Client => orders_where(conn, order::Column::ClientId.eq(id)).await?,
        EntityKind::Auto => {
            let mut ids = orders_where(conn, order::Column::AutoId.eq(id)).await?;
            let entry_order_ids: Vec<i32> = OrderEntry::find()
                .select_only()
                .column(order_entry::Column::OrderId)
                .filter(order_entry::Column::AutoId.eq(id))
                .into_tuple()
                .all(conn)
                .await?;
            ids.extend(entry_order_ids);
            ids
        }
        EntityKind::Order | EntityKind::Sale => Vec::new(),
    };

    let decision = DeleteDecision::from_references(blocking);
    if let DeleteDecision::Denied { blocking_order_ids } = &decision {
        tracing::debug!(
            "Delete of {} #{} blocked by orders {:?}",
            kind,
            id,
            blocking_order_ids
        );
    }

    Ok(decision)
}

/// Run the guard and turn a denial into a `ReferentialConflict`
pub async fn ensure_deletable<C: ConnectionTrait>(
    conn: &C,
    kind: EntityKind,
    id: i32,
) -> Result<(), DomainError> {
    match can_delete(conn, kind, id).await? {
        DeleteDecision::Allowed => Ok(()),
        DeleteDecision::Denied { blocking_order_ids } => Err(DomainError::ReferentialConflict {
            entity: kind,
            id,
            blocking_order_ids,
        }),
    }
}

async fn orders_where<C: ConnectionTrait>(
    conn: &C,
    condition: sea_orm::sea_query::SimpleExpr,
) -> Result<Vec<i32>, DomainError> {
    let ids = Order::find()
        .select_only()
        .column(order::Column::Id)
        .filter(condition)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(ids)
}
