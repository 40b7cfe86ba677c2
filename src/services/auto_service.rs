//! Auto Service - the dealership's vehicle catalogue

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::{DomainError, EntityKind, validate_auto};
use crate::models::auto::{self as auto_model, AutoInput, Entity as Auto};
use crate::services::reference_guard;

/// List all autos by ascending id
pub async fn list_autos(db: &DatabaseConnection) -> Result<Vec<auto_model::Model>, DomainError> {
    let autos = Auto::find()
        .order_by_asc(auto_model::Column::Id)
        .all(db)
        .await?;
    Ok(autos)
}

pub async fn get_auto(db: &DatabaseConnection, id: i32) -> Result<auto_model::Model, DomainError> {
    find_auto(db, id).await
}

pub(crate) async fn find_auto<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<auto_model::Model, DomainError> {
    Auto::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DomainError::not_found(EntityKind::Auto, id))
}

/// Register a new auto
pub async fn register_auto(
    db: &DatabaseConnection,
    input: AutoInput,
) -> Result<auto_model::Model, DomainError> {
    let valid = validate_auto(&input.name, &input.price, &input.code, &input.manufacturer)?;

    let txn = db.begin().await?;
    ensure_code_free(&txn, &valid.code, None).await?;

    let now = chrono::Utc::now().to_rfc3339();
    let new_auto = auto_model::ActiveModel {
        name: Set(valid.name),
        price: Set(valid.price),
        code: Set(valid.code),
        manufacturer: Set(valid.manufacturer),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };

    let saved = new_auto.insert(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        "Registered auto #{} ({}, code {}, price {})",
        saved.id,
        saved.name,
        saved.code,
        saved.price
    );
    Ok(saved)
}

/// Replace the editable fields of an existing auto.
/// Completed sales keep their recorded totals; a new price only affects future completions.
pub async fn update_auto(
    db: &DatabaseConnection,
    id: i32,
    input: AutoInput,
) -> Result<auto_model::Model, DomainError> {
    let valid = validate_auto(&input.name, &input.price, &input.code, &input.manufacturer)?;

    let txn = db.begin().await?;
    let auto = find_auto(&txn, id).await?;
    ensure_code_free(&txn, &valid.code, Some(id)).await?;

    let mut active_model: auto_model::ActiveModel = auto.into();
    active_model.name = Set(valid.name);
    active_model.price = Set(valid.price);
    active_model.code = Set(valid.code);
    active_model.manufacturer = Set(valid.manufacturer);
    active_model.updated_at = Set(chrono::Utc::now().to_rfc3339());

    let model = active_model.update(&txn).await?;
    txn.commit().await?;

    tracing::info!("Updated auto #{}", model.id);
    Ok(model)
}

/// Delete an auto that no order or order entry references
pub async fn delete_auto(db: &DatabaseConnection, id: i32) -> Result<(), DomainError> {
    let txn = db.begin().await?;
    find_auto(&txn, id).await?;

    if let Err(e) = reference_guard::ensure_deletable(&txn, EntityKind::Auto, id).await {
        tracing::warn!("Refused to delete auto #{}: {}", id, e);
        return Err(e);
    }

    Auto::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!("Deleted auto #{}", id);
    Ok(())
}

async fn ensure_code_free<C: ConnectionTrait>(
    conn: &C,
    code: &str,
    exclude_id: Option<i32>,
) -> Result<(), DomainError> {
    let mut query = Auto::find().filter(auto_model::Column::Code.eq(code));
    if let Some(id) = exclude_id {
        query = query.filter(auto_model::Column::Id.ne(id));
    }

    match query.one(conn).await? {
        Some(existing) => Err(DomainError::Conflict(format!(
            "Auto code {} is already used by auto #{}",
            code, existing.id
        ))),
        None => Ok(()),
    }
}
