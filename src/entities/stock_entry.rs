use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of quantity change recorded in the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ChangeType {
    /// Quantity decrease; recorded with a negative (or absolute-consumed)
    /// change_quantity
    #[sea_orm(string_value = "Sale")]
    Sale,
    /// Quantity increase; recorded positive
    #[sea_orm(string_value = "Restock")]
    Restock,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::Sale => f.write_str("Sale"),
            ChangeType::Restock => f.write_str("Restock"),
        }
    }
}

/// Append-only ledger row recording one quantity change for a product.
/// Immutable once written.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub entry_id: i32,
    pub product_id: i32,
    pub change_type: ChangeType,
    pub change_quantity: i32,
    pub entry_date: DateTimeUtc,
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
