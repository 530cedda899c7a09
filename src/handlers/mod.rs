pub mod catalog;
pub mod common;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod reorders;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Assemble the full application router.
///
/// Every panel of the dashboard is its own endpoint, so a failing query
/// degrades that one panel instead of blanking the whole view.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api-doc/openapi.json", get(crate::openapi::serve_openapi))
        .nest("/api/v1/dashboard", dashboard::routes())
        .nest("/api/v1/catalog", catalog::routes())
        .nest("/api/v1/products", products::routes())
        .nest("/api/v1/reorders", reorders::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
