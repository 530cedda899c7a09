use std::sync::Arc;

use axum::{extract::State, response::IntoResponse};
use serde_json::json;

use super::common::success_response;
use crate::{db, errors::ApiError, AppState};

/// Liveness check that pings the store.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are reachable"),
        (status = 503, description = "Store connection unavailable")
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    db::check_connection(&state.db).await?;
    Ok(success_response(json!({ "status": "ok" })))
}
