use std::sync::Arc;

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{product, product_inventory_history, supplier},
    errors::ServiceError,
};

/// Supplier contact row. Field order matches the displayed column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierContactRow {
    pub supplier_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
}

/// Product row joined with its supplier's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSupplierRow {
    pub product_name: String,
    pub supplier_name: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
}

/// Product at or below its reorder level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NeedsReorderRow {
    pub product_name: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
}

/// The three fixed dashboard tables, keyed by their display labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportTables {
    #[serde(rename = "Suppliers Contact Details")]
    pub supplier_contacts: Vec<SupplierContactRow>,
    #[serde(rename = "Products with Supplier and Stock")]
    pub products_with_supplier: Vec<ProductSupplierRow>,
    #[serde(rename = "Products Needing Reorder")]
    pub products_needing_reorder: Vec<NeedsReorderRow>,
}

/// Read-only tabular reports. Rows are fully materialized before they cross
/// the presentation boundary; no cursor or connection ever leaves this
/// module.
#[derive(Clone)]
pub struct ReportService {
    db: Arc<DbPool>,
}

impl ReportService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Assemble all three report tables. Each section is its own query; a
    /// failure in any of them fails the call.
    #[instrument(skip(self))]
    pub async fn report_tables(&self) -> Result<ReportTables, ServiceError> {
        Ok(ReportTables {
            supplier_contacts: self.supplier_contacts().await?,
            products_with_supplier: self.products_with_supplier().await?,
            products_needing_reorder: self.products_needing_reorder().await?,
        })
    }

    async fn supplier_contacts(&self) -> Result<Vec<SupplierContactRow>, ServiceError> {
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::SupplierName)
            .all(&*self.db)
            .await?;
        Ok(suppliers
            .into_iter()
            .map(|s| SupplierContactRow {
                supplier_name: s.supplier_name,
                contact_name: s.contact_name,
                email: s.email,
                phone: s.phone,
            })
            .collect())
    }

    async fn products_with_supplier(&self) -> Result<Vec<ProductSupplierRow>, ServiceError> {
        let products = product::Entity::find()
            .find_also_related(supplier::Entity)
            .order_by_asc(product::Column::ProductName)
            .all(&*self.db)
            .await?;
        Ok(products
            .into_iter()
            .map(|(p, s)| ProductSupplierRow {
                product_name: p.product_name,
                supplier_name: s.map(|s| s.supplier_name).unwrap_or_default(),
                stock_quantity: p.stock_quantity,
                reorder_level: p.reorder_level,
            })
            .collect())
    }

    async fn products_needing_reorder(&self) -> Result<Vec<NeedsReorderRow>, ServiceError> {
        let products = product::Entity::find()
            .filter(
                Expr::col(product::Column::StockQuantity)
                    .lte(Expr::col(product::Column::ReorderLevel)),
            )
            .order_by_asc(product::Column::ProductName)
            .all(&*self.db)
            .await?;
        Ok(products
            .into_iter()
            .map(|p| NeedsReorderRow {
                product_name: p.product_name,
                stock_quantity: p.stock_quantity,
                reorder_level: p.reorder_level,
            })
            .collect())
    }

    /// Inventory history for one product, newest first. A product with no
    /// history yields an empty sequence, not an error.
    #[instrument(skip(self))]
    pub async fn product_history(
        &self,
        product_id: i32,
    ) -> Result<Vec<product_inventory_history::Model>, ServiceError> {
        let rows = product_inventory_history::Entity::find()
            .filter(product_inventory_history::Column::ProductId.eq(product_id))
            .order_by_desc(product_inventory_history::Column::RecordDate)
            .all(&*self.db)
            .await?;
        Ok(rows)
    }
}
