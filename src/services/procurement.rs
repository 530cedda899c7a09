use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{product, product_inventory_history, reorder, stock_entry, ChangeType, ReorderStatus},
    errors::ServiceError,
};

/// An open reorder as shown in the receive picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OpenReorder {
    pub reorder_id: i32,
    pub product_name: String,
}

/// Reorder lifecycle: placed in status Ordered, received into the terminal
/// status Received. No cancel, no reopen.
#[derive(Clone)]
pub struct ProcurementService {
    db: Arc<DbPool>,
}

impl ProcurementService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Place a reorder for a product and return the store-assigned id.
    /// Status starts as Ordered with the current time as reorder date.
    #[instrument(skip(self))]
    pub async fn place_reorder(&self, product_id: i32, quantity: i32) -> Result<i32, ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::validation(
                "reorder quantity must be at least 1",
            ));
        }

        let db = &*self.db;

        product::Entity::find_by_id(product_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("product {} not found", product_id)))?;

        let created = reorder::ActiveModel {
            product_id: Set(product_id),
            reorder_quantity: Set(quantity),
            reorder_date: Set(Utc::now()),
            status: Set(ReorderStatus::Ordered),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(
            reorder_id = created.reorder_id,
            product_id, quantity, "reorder placed"
        );

        Ok(created.reorder_id)
    }

    /// Reorders still awaiting receipt, joined with the product name.
    ///
    /// Filters on status Ordered, matching the system of record's listing.
    /// Rows another actor wrote as Pending do not appear here even though
    /// the below-reorder metric treats them as pending-like.
    #[instrument(skip(self))]
    pub async fn open_reorders(&self) -> Result<Vec<OpenReorder>, ServiceError> {
        let reorders = reorder::Entity::find()
            .filter(reorder::Column::Status.eq(ReorderStatus::Ordered))
            .find_also_related(product::Entity)
            .all(&*self.db)
            .await?;

        Ok(reorders
            .into_iter()
            .map(|(r, p)| OpenReorder {
                reorder_id: r.reorder_id,
                product_name: p.map(|p| p.product_name).unwrap_or_default(),
            })
            .collect())
    }

    /// Receive a reorder: flip its status to Received, add the quantity to
    /// the product's stock, and append the Restock ledger and history rows.
    /// Runs as one transaction so the store never shows a half-applied
    /// receipt. Receiving anything but an Ordered reorder is rejected.
    #[instrument(skip(self))]
    pub async fn mark_reorder_received(&self, reorder_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db;

        let result = db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    let reorder = reorder::Entity::find_by_id(reorder_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::not_found(format!("reorder {} not found", reorder_id))
                        })?;

                    if reorder.status != ReorderStatus::Ordered {
                        return Err(ServiceError::InvalidOperation(format!(
                            "reorder {} is {}, only Ordered reorders can be received",
                            reorder_id, reorder.status
                        )));
                    }

                    let product = product::Entity::find_by_id(reorder.product_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::not_found(format!(
                                "product {} not found",
                                reorder.product_id
                            ))
                        })?;

                    let quantity = reorder.reorder_quantity;
                    let new_stock = product.stock_quantity + quantity;
                    let product_id = product.product_id;
                    let now = Utc::now();

                    let mut reorder_update: reorder::ActiveModel = reorder.into();
                    reorder_update.status = Set(ReorderStatus::Received);
                    reorder_update.update(txn).await?;

                    let mut product_update: product::ActiveModel = product.into();
                    product_update.stock_quantity = Set(new_stock);
                    product_update.update(txn).await?;

                    stock_entry::ActiveModel {
                        product_id: Set(product_id),
                        change_type: Set(ChangeType::Restock),
                        change_quantity: Set(quantity),
                        entry_date: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    product_inventory_history::ActiveModel {
                        product_id: Set(product_id),
                        record_date: Set(now),
                        change_type: Set(ChangeType::Restock),
                        change_quantity: Set(quantity),
                        stock_after: Set(new_stock),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    Ok(())
                })
            })
            .await;

        match result {
            Ok(()) => {
                info!(reorder_id, "reorder received");
                Ok(())
            }
            Err(sea_orm::TransactionError::Connection(e)) => Err(ServiceError::Database(e)),
            Err(sea_orm::TransactionError::Transaction(e)) => Err(e),
        }
    }
}
