use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, routing::get, Router};

use super::common::success_response;
use crate::{errors::ApiError, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(categories))
        .route("/suppliers", get(suppliers))
        .route("/products", get(products))
}

/// Distinct category labels, ascending.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories",
    responses((status = 200, body = [String]))
)]
pub(crate) async fn categories(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = state.catalog.categories().await?;
    Ok(success_response(categories))
}

/// Suppliers as {id, name}, ascending by name.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/suppliers",
    responses((status = 200, body = [crate::services::catalog::SupplierRef]))
)]
pub(crate) async fn suppliers(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let suppliers = state.catalog.suppliers().await?;
    Ok(success_response(suppliers))
}

/// Products as {id, name}, ascending by name.
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products",
    responses((status = 200, body = [crate::services::catalog::ProductRef]))
)]
pub(crate) async fn products(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.catalog.products().await?;
    Ok(success_response(products))
}
