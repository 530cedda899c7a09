use std::sync::Arc;

use sea_orm::{EntityTrait, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{product, supplier},
    errors::ServiceError,
};

/// Supplier reference for selection inputs. The id travels with the name so
/// the presentation layer can build its own display lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplierRef {
    pub supplier_id: i32,
    pub supplier_name: String,
}

/// Product reference for selection inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductRef {
    pub product_id: i32,
    pub product_name: String,
}

/// Read-only reference lists backing the presentation layer's selection
/// inputs. Small tables, queried fresh on every call.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DbPool>,
}

impl CatalogService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Distinct category labels, ascending alphabetical, duplicate-free.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        let categories: Vec<String> = product::Entity::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .order_by_asc(product::Column::Category)
            .into_tuple()
            .all(&*self.db)
            .await?;
        Ok(categories)
    }

    /// All suppliers as {id, name}, ascending by name.
    #[instrument(skip(self))]
    pub async fn suppliers(&self) -> Result<Vec<SupplierRef>, ServiceError> {
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::SupplierName)
            .all(&*self.db)
            .await?;
        Ok(suppliers
            .into_iter()
            .map(|s| SupplierRef {
                supplier_id: s.supplier_id,
                supplier_name: s.supplier_name,
            })
            .collect())
    }

    /// All products as {id, name}, ascending by name.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<ProductRef>, ServiceError> {
        let products = product::Entity::find()
            .order_by_asc(product::Column::ProductName)
            .all(&*self.db)
            .await?;
        Ok(products
            .into_iter()
            .map(|p| ProductRef {
                product_id: p.product_id,
                product_name: p.product_name,
            })
            .collect())
    }
}
