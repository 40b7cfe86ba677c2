use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i32,
    pub auto_id: i32, // primary auto, fixed at creation
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::auto::Entity",
        from = "Column::AutoId",
        to = "super::auto::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Auto,
    #[sea_orm(has_many = "super::order_entry::Entity")]
    OrderEntry,
    #[sea_orm(has_one = "super::sale::Entity")]
    Sale,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::auto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auto.def()
    }
}

impl Related<super::order_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderEntry.def()
    }
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderInput {
    pub client_id: i32,
    pub auto_id: i32,
}
