use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Snapshot of one auto included in a finalized sale
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sale_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sale_id: i32,
    pub auto_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Sale,
    #[sea_orm(
        belongs_to = "super::auto::Entity",
        from = "Column::AutoId",
        to = "super::auto::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Auto,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::auto::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auto.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
