use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{created_response, success_response, validate_input};
use crate::{errors::ApiError, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(place_reorder))
        .route("/open", get(open_reorders))
        .route("/:id/receive", post(receive_reorder))
}

#[derive(Debug, Deserialize, Serialize, Validate, ToSchema)]
pub struct PlaceReorderRequest {
    pub product_id: i32,
    #[validate(range(min = 1, message = "reorder quantity must be at least 1"))]
    pub quantity: i32,
}

/// Place a reorder for a product. Starts in status Ordered.
#[utoipa::path(
    post,
    path = "/api/v1/reorders",
    request_body = PlaceReorderRequest,
    responses(
        (status = 201, description = "Reorder placed"),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Unknown product")
    )
)]
pub(crate) async fn place_reorder(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PlaceReorderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let reorder_id = state
        .procurement
        .place_reorder(payload.product_id, payload.quantity)
        .await?;

    Ok(created_response(json!({ "reorder_id": reorder_id })))
}

/// Reorders awaiting receipt.
#[utoipa::path(
    get,
    path = "/api/v1/reorders/open",
    responses((status = 200, body = [crate::services::procurement::OpenReorder]))
)]
pub(crate) async fn open_reorders(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let reorders = state.procurement.open_reorders().await?;
    Ok(success_response(reorders))
}

/// Mark a reorder received. Terminal transition; repeating it returns 409.
#[utoipa::path(
    post,
    path = "/api/v1/reorders/{id}/receive",
    params(("id" = i32, Path, description = "Reorder identifier")),
    responses(
        (status = 200, description = "Reorder received, stock adjusted"),
        (status = 404, description = "Unknown reorder"),
        (status = 409, description = "Reorder not in a receivable state")
    )
)]
pub(crate) async fn receive_reorder(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state.procurement.mark_reorder_received(id).await?;
    Ok(success_response(json!({ "reorder_id": id })))
}
