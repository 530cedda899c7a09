use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    db::DbPool,
    entities::{product, stock_entry, ChangeType},
    errors::ServiceError,
};

/// One point of the monthly sales trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthlySalesPoint {
    /// Calendar month as "YYYY-MM"
    pub month: String,
    pub total_sales: Decimal,
}

/// One slice of the category stock distribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryStockPoint {
    pub category: String,
    pub total_stock: i64,
}

/// Time- and category-bucketed aggregates for charting.
///
/// Aggregation happens in-process over fetched rows rather than in
/// backend-specific SQL date functions, keeping the queries portable across
/// the Postgres and SQLite backends the crate enables.
#[derive(Clone)]
pub struct TrendService {
    db: Arc<DbPool>,
}

impl TrendService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Sale value per calendar month over the full ledger, ascending by
    /// month. Totals are sums of |change_quantity × price|.
    #[instrument(skip(self))]
    pub async fn monthly_sales(&self) -> Result<Vec<MonthlySalesPoint>, ServiceError> {
        let entries = stock_entry::Entity::find()
            .filter(stock_entry::Column::ChangeType.eq(ChangeType::Sale))
            .find_also_related(product::Entity)
            .all(&*self.db)
            .await?;

        // BTreeMap keys sort lexicographically, which for "YYYY-MM" is
        // chronological order.
        let mut buckets: BTreeMap<String, Decimal> = BTreeMap::new();
        for (entry, product) in entries {
            let Some(product) = product else { continue };
            let month = entry.entry_date.format("%Y-%m").to_string();
            let value = (Decimal::from(entry.change_quantity) * product.price).abs();
            *buckets.entry(month).or_insert(Decimal::ZERO) += value;
        }

        Ok(buckets
            .into_iter()
            .map(|(month, total)| MonthlySalesPoint {
                month,
                total_sales: total.round_dp(2),
            })
            .collect())
    }

    /// Current stock totals grouped by category, descending by total stock.
    /// Ties break alphabetically so the ordering is deterministic.
    #[instrument(skip(self))]
    pub async fn category_stock_distribution(
        &self,
    ) -> Result<Vec<CategoryStockPoint>, ServiceError> {
        let products = product::Entity::find().all(&*self.db).await?;

        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for p in products {
            *totals.entry(p.category).or_insert(0) += i64::from(p.stock_quantity);
        }

        let mut points: Vec<CategoryStockPoint> = totals
            .into_iter()
            .map(|(category, total_stock)| CategoryStockPoint {
                category,
                total_stock,
            })
            .collect();
        points.sort_by(|a, b| {
            b.total_stock
                .cmp(&a.total_stock)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(points)
    }
}
