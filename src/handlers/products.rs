use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{created_response, success_response, validate_input};
use crate::{errors::ApiError, services::products::NewProduct, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_product))
        .route("/:id/history", get(product_history))
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "product name must not be empty"))]
    pub product_name: String,
    pub category: String,
    pub price: Decimal,
    #[validate(range(min = 0, message = "stock quantity must be non-negative"))]
    pub stock_quantity: i32,
    #[validate(range(min = 0, message = "reorder level must be non-negative"))]
    pub reorder_level: i32,
    pub supplier_id: i32,
}

/// Create a product. The store assigns the identifier, which is echoed back.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created"),
        (status = 400, description = "Invalid input, rejected before any store call"),
        (status = 404, description = "Unknown supplier")
    )
)]
pub(crate) async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let product_id = state
        .products
        .add_product(NewProduct {
            product_name: payload.product_name,
            category: payload.category,
            price: payload.price,
            stock_quantity: payload.stock_quantity,
            reorder_level: payload.reorder_level,
            supplier_id: payload.supplier_id,
        })
        .await?;

    Ok(created_response(json!({ "product_id": product_id })))
}

/// Inventory history for one product, newest first. Empty list when the
/// product has no history.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/history",
    params(("id" = i32, Path, description = "Product identifier")),
    responses((status = 200, description = "History rows, newest first"))
)]
pub(crate) async fn product_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.reports.product_history(id).await?;
    Ok(success_response(history))
}
