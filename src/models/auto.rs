use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "autos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    #[sea_orm(unique)]
    pub code: String,
    pub manufacturer: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
    #[sea_orm(has_many = "super::order_entry::Entity")]
    OrderEntry,
    #[sea_orm(has_many = "super::sale_entry::Entity")]
    SaleEntry,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::order_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderEntry.def()
    }
}

impl Related<super::sale_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Raw auto fields as submitted by a caller. `price` stays a string until validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoInput {
    pub name: String,
    pub price: String,
    pub code: String,
    pub manufacturer: String,
}
