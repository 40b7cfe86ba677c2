use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub order_id: i32, // at most one sale per order
    pub total_cost: f64,
    pub sale_date: String, // YYYY-MM-DD
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Order,
    #[sea_orm(has_many = "super::sale_entry::Entity")]
    SaleEntry,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::sale_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
