//! Overview Service - raw dump of every table, for inspecting the store during development

use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use serde::Serialize;

use crate::domain::DomainError;
use crate::models::{auto, client, order, order_entry, sale, sale_entry};

#[derive(Debug, Serialize)]
pub struct TablesDump {
    pub clients: Vec<client::Model>,
    pub autos: Vec<auto::Model>,
    pub orders: Vec<order::Model>,
    pub sales: Vec<sale::Model>,
    pub order_entries: Vec<order_entry::Model>,
    pub sale_entries: Vec<sale_entry::Model>,
}

/// Every row of every table, each table by ascending id
pub async fn dump_tables(db: &DatabaseConnection) -> Result<TablesDump, DomainError> {
    Ok(TablesDump {
        clients: client::Entity::find()
            .order_by_asc(client::Column::Id)
            .all(db)
            .await?,
        autos: auto::Entity::find()
            .order_by_asc(auto::Column::Id)
            .all(db)
            .await?,
        orders: order::Entity::find()
            .order_by_asc(order::Column::Id)
            .all(db)
            .await?,
        sales: sale::Entity::find()
            .order_by_asc(sale::Column::Id)
            .all(db)
            .await?,
        order_entries: order_entry::Entity::find()
            .order_by_asc(order_entry::Column::Id)
            .all(db)
            .await?,
        sale_entries: sale_entry::Entity::find()
            .order_by_asc(sale_entry::Column::Id)
            .all(db)
            .await?,
    })
}
