use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::stock_entry::ChangeType;

/// Historical inventory record per product, read newest-first. Read-only
/// from this core apart from the append made when a reorder is received.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_inventory_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub history_id: i32,
    pub product_id: i32,
    pub record_date: DateTimeUtc,
    pub change_type: ChangeType,
    pub change_quantity: i32,
    /// Stock level after the change was applied
    pub stock_after: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::ProductId"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
