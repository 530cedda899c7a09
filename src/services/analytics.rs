use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{product, reorder, stock_entry, supplier, ChangeType, ReorderStatus},
    errors::ServiceError,
};

/// Overview metrics for the dashboard header cards.
///
/// Monetary values are rounded to 2 decimal places; empty sums normalize to
/// zero so the caller never sees a null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OverviewMetrics {
    pub total_suppliers: u64,
    pub total_products: u64,
    pub total_categories: u64,
    /// Sale value over the 3 months preceding the newest ledger entry
    pub sale_value_3m: Decimal,
    /// Restock value over the same rolling window
    pub restock_value_3m: Decimal,
    /// Products below their reorder level with no pending reorder
    pub below_reorder_no_pending: u64,
}

/// Read-only aggregate metrics over the store.
#[derive(Clone)]
pub struct AnalyticsService {
    db: Arc<DbPool>,
}

impl AnalyticsService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Compute the six overview metrics. Any failing query fails the whole
    /// overview; no partial result is returned.
    #[instrument(skip(self))]
    pub async fn overview(&self) -> Result<OverviewMetrics, ServiceError> {
        let db = &*self.db;

        let total_suppliers = supplier::Entity::find().count(db).await?;
        let total_products = product::Entity::find().count(db).await?;

        let categories: Vec<String> = product::Entity::find()
            .select_only()
            .column(product::Column::Category)
            .distinct()
            .into_tuple()
            .all(db)
            .await?;
        let total_categories = categories.len() as u64;

        let (sale_value_3m, restock_value_3m) = self.windowed_ledger_values().await?;
        let below_reorder_no_pending = self.below_reorder_without_pending().await?;

        Ok(OverviewMetrics {
            total_suppliers,
            total_products,
            total_categories,
            sale_value_3m,
            restock_value_3m,
            below_reorder_no_pending,
        })
    }

    /// Sale and restock value over the rolling 3-month window. The window is
    /// anchored to the newest entry_date in the ledger, not to wall-clock
    /// time, so a stale dataset still reports its own final quarter.
    async fn windowed_ledger_values(&self) -> Result<(Decimal, Decimal), ServiceError> {
        let db = &*self.db;

        let newest = stock_entry::Entity::find()
            .order_by_desc(stock_entry::Column::EntryDate)
            .one(db)
            .await?;

        let Some(newest) = newest else {
            // Empty ledger: both sums normalize to zero.
            return Ok((Decimal::ZERO, Decimal::ZERO));
        };

        let window_start = newest
            .entry_date
            .checked_sub_months(Months::new(3))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        let entries = stock_entry::Entity::find()
            .filter(stock_entry::Column::EntryDate.gte(window_start))
            .find_also_related(product::Entity)
            .all(db)
            .await?;

        let mut sale_value = Decimal::ZERO;
        let mut restock_value = Decimal::ZERO;
        for (entry, product) in entries {
            let Some(product) = product else { continue };
            match entry.change_type {
                ChangeType::Sale => {
                    sale_value += Decimal::from(entry.change_quantity.abs()) * product.price;
                }
                ChangeType::Restock => {
                    restock_value += Decimal::from(entry.change_quantity) * product.price;
                }
            }
        }

        Ok((sale_value.round_dp(2), restock_value.round_dp(2)))
    }

    /// Count of products below their reorder level that have no reorder row
    /// in status Pending. The Pending check mirrors the system of record; a
    /// reorder placed through this crate carries status Ordered and does not
    /// suppress the metric.
    async fn below_reorder_without_pending(&self) -> Result<u64, ServiceError> {
        let db = &*self.db;

        let pending_product_ids: HashSet<i32> = reorder::Entity::find()
            .filter(reorder::Column::Status.eq(ReorderStatus::Pending))
            .select_only()
            .column(reorder::Column::ProductId)
            .into_tuple::<i32>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let below_reorder = product::Entity::find()
            .filter(
                Expr::col(product::Column::StockQuantity)
                    .lt(Expr::col(product::Column::ReorderLevel)),
            )
            .all(db)
            .await?;

        let count = below_reorder
            .iter()
            .filter(|p| !pending_product_ids.contains(&p.product_id))
            .count() as u64;

        Ok(count)
    }
}
