use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reorder lifecycle state.
///
/// The system of record carries both "Ordered" (written when a reorder is
/// placed) and "Pending" (checked by the below-reorder metric). The two are
/// kept as distinct values rather than silently merged; this crate never
/// writes Pending, but other actors against the same store do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReorderStatus {
    #[sea_orm(string_value = "Ordered")]
    Ordered,
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Terminal; a received reorder cannot be reopened or cancelled
    #[sea_orm(string_value = "Received")]
    Received,
}

impl std::fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReorderStatus::Ordered => f.write_str("Ordered"),
            ReorderStatus::Pending => f.write_str("Pending"),
            ReorderStatus::Received => f.write_str("Received"),
        }
    }
}

/// A request to replenish stock for one product. Never deleted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reorders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub reorder_id: i32,
    pub product_id: i32,
    pub reorder_quantity: i32,
    pub reorder_date: DateTimeUtc,
    pub status: ReorderStatus,
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
