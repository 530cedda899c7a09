use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Router};

use super::common::success_response;
use crate::{errors::ApiError, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/overview", get(overview))
        .route("/monthly-sales", get(monthly_sales))
        .route("/category-stock", get(category_stock))
        .route("/tables", get(tables))
}

/// Overview metric cards: supplier/product/category counts, windowed sale
/// and restock value, below-reorder count.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/overview",
    responses(
        (status = 200, body = crate::services::analytics::OverviewMetrics),
        (status = 500, description = "Data unavailable")
    )
)]
pub(crate) async fn overview(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let metrics = state.analytics.overview().await?;
    Ok(success_response(metrics))
}

/// Monthly sales trend over the full ledger.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/monthly-sales",
    responses(
        (status = 200, body = [crate::services::trends::MonthlySalesPoint]),
        (status = 500, description = "Data unavailable")
    )
)]
pub(crate) async fn monthly_sales(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let points = state.trends.monthly_sales().await?;
    Ok(success_response(points))
}

/// Current stock share per category, largest first.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/category-stock",
    responses(
        (status = 200, body = [crate::services::trends::CategoryStockPoint]),
        (status = 500, description = "Data unavailable")
    )
)]
pub(crate) async fn category_stock(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let points = state.trends.category_stock_distribution().await?;
    Ok(success_response(points))
}

/// The three detailed dashboard tables.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/tables",
    responses(
        (status = 200, body = crate::services::reports::ReportTables),
        (status = 500, description = "Data unavailable")
    )
)]
pub(crate) async fn tables(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let tables = state.reports.report_tables().await?;
    Ok(success_response(tables))
}
