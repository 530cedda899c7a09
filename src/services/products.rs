use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    db::DbPool,
    entities::{product, supplier},
    errors::ServiceError,
};

/// Input for creating a product. Identifier assignment is delegated to the
/// store (auto-increment); the generated key is read back from the insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub category: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub supplier_id: i32,
}

/// Product mutations.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Create a product and return its store-assigned identifier.
    ///
    /// Validation runs before any store call: the name must be non-empty and
    /// price, stock and reorder level non-negative. Store-side constraint
    /// violations surface as mutation failures with the underlying message.
    #[instrument(skip(self))]
    pub async fn add_product(&self, input: NewProduct) -> Result<i32, ServiceError> {
        if input.product_name.trim().is_empty() {
            return Err(ServiceError::validation("product name must not be empty"));
        }
        if input.price < Decimal::ZERO {
            return Err(ServiceError::validation("price must be non-negative"));
        }
        if input.stock_quantity < 0 {
            return Err(ServiceError::validation(
                "stock quantity must be non-negative",
            ));
        }
        if input.reorder_level < 0 {
            return Err(ServiceError::validation(
                "reorder level must be non-negative",
            ));
        }

        let db = &*self.db;

        supplier::Entity::find_by_id(input.supplier_id)
            .one(db)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("supplier {} not found", input.supplier_id))
            })?;

        let created = product::ActiveModel {
            product_name: Set(input.product_name.trim().to_string()),
            category: Set(input.category),
            price: Set(input.price),
            stock_quantity: Set(input.stock_quantity),
            reorder_level: Set(input.reorder_level),
            supplier_id: Set(input.supplier_id),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            product_id = created.product_id,
            "product '{}' created", created.product_name
        );

        Ok(created.product_id)
    }
}
