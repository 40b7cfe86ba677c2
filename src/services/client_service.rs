//! Client Service - registration and maintenance of dealership clients

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{DomainError, EntityKind, ValidClient, validate_client};
use crate::models::client::{self as client_model, ClientInput, Entity as Client};
use crate::services::reference_guard;

/// List all clients by ascending id
pub async fn list_clients(db: &DatabaseConnection) -> Result<Vec<client_model::Model>, DomainError> {
    let clients = Client::find()
        .order_by_asc(client_model::Column::Id)
        .all(db)
        .await?;
    Ok(clients)
}

/// Get a single client by ID
pub async fn get_client(
    db: &DatabaseConnection,
    id: i32,
) -> Result<client_model::Model, DomainError> {
    Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, id))
}

/// Register a new client
pub async fn register_client(
    db: &DatabaseConnection,
    input: ClientInput,
) -> Result<client_model::Model, DomainError> {
    let valid = validate_client(&input.name, &input.phone, &input.code)?;

    let txn = db.begin().await?;
    ensure_unique(&txn, &valid, None).await?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_client = client_model::ActiveModel {
        name: Set(valid.name),
        phone: Set(valid.phone),
        code: Set(valid.code),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_client.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!("Registered client #{} ({})", saved.id, saved.name);
    Ok(saved)
}

/// Replace the editable fields of an existing client
pub async fn update_client(
    db: &DatabaseConnection,
    id: i32,
    input: ClientInput,
) -> Result<client_model::Model, DomainError> {
    let valid = validate_client(&input.name, &input.phone, &input.code)?;

    let txn = db.begin().await?;
    let client = Client::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, id))?;

    ensure_unique(&txn, &valid, Some(id)).await?;

    let mut active_model: client_model::ActiveModel = client.into();
    active_model.name = Set(valid.name);
    active_model.phone = Set(valid.phone);
    active_model.code = Set(valid.code);
    active_model.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = active_model.update(&txn).await?;
    txn.commit().await?;

    tracing::info!("Updated client #{}", model.id);
    Ok(model)
}

/// Delete a client that no order references
pub async fn delete_client(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;

    Client::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Client, id))?;

    if let Err(e) = reference_guard::ensure_deletable(&txn, EntityKind::Client, id).await {
        tracing::warn!("Refused to delete client #{}: {}", id, e);
        return Err(e);
    }

    Client::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted client #{}", id);
    Ok(())
}

/// Phone and code must not belong to another client
async fn ensure_unique<C: ConnectionTrait>(
    conn: &C,
    client: &ValidClient,
    exclude_id: Option<i32>,
) -> Result<(), DomainError> {
    let checks = [
        (
            client_model::Column::Phone,
            &client.phone,
            "phone number",
        ),
        (client_model::Column::Code, &client.code, "code"),
    ];

    for (column, value, label) in checks {
        let mut query = Client::find().filter(column.eq(value.as_str()));
        if let Some(id) = exclude_id {
            query = query.filter(client_model::Column::Id.ne(id));
        }

        if let Some(existing) = query.one(conn).await? {
            return Err(DomainError::Conflict(format!(
                "Client {} {} is already registered to client #{}",
                label, value, existing.id
            )));
        }
    }

    Ok(())
}
