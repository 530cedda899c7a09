use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::handlers;
use crate::services::{
    analytics::OverviewMetrics,
    catalog::{ProductRef, SupplierRef},
    procurement::OpenReorder,
    reports::{NeedsReorderRow, ProductSupplierRow, ReportTables, SupplierContactRow},
    trends::{CategoryStockPoint, MonthlySalesPoint},
};

/// OpenAPI description of the dashboard API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockboard API",
        description = "Inventory dashboard backend: metrics, trends, catalogs, reorder operations"
    ),
    paths(
        handlers::health::health_check,
        handlers::dashboard::overview,
        handlers::dashboard::monthly_sales,
        handlers::dashboard::category_stock,
        handlers::dashboard::tables,
        handlers::catalog::categories,
        handlers::catalog::suppliers,
        handlers::catalog::products,
        handlers::products::create_product,
        handlers::products::product_history,
        handlers::reorders::place_reorder,
        handlers::reorders::open_reorders,
        handlers::reorders::receive_reorder,
    ),
    components(schemas(
        ErrorResponse,
        OverviewMetrics,
        SupplierRef,
        ProductRef,
        ReportTables,
        SupplierContactRow,
        ProductSupplierRow,
        NeedsReorderRow,
        MonthlySalesPoint,
        CategoryStockPoint,
        OpenReorder,
        handlers::products::CreateProductRequest,
        handlers::reorders::PlaceReorderRequest,
    ))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn serve_openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/dashboard/overview"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/reorders/{id}/receive"));
        assert_eq!(paths.len(), 13);
    }
}
