use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An additional auto attached to an open order
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub auto_id: i32,
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
    #[sea_orm(
        belongs_to = "super::auto::Entity",
        from = "Column::AutoId",
        to = "super::auto::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Auto,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<super::auto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
