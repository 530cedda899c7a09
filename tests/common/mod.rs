use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::Value;
use tower::ServiceExt;

use stockboard_api::{
    config::AppConfig,
    db::{self, DbConfig},
    entities::{product, stock_entry, supplier, ChangeType},
    handlers::app_router,
    AppState,
};

/// Test harness: the full router over a fresh in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: Arc<AppState>,
}

impl TestApp {
    /// Construct a new test application with migrated, empty state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            0,
            "test".to_string(),
        );

        // A single pooled connection keeps the in-memory database alive for
        // the whole test.
        let db_cfg = DbConfig {
            url: cfg.database_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };
        let pool = db::establish_connection_with_config(&db_cfg)
            .await
            .expect("in-memory sqlite connects");
        db::run_migrations(&pool).await.expect("migrations apply");

        let state = Arc::new(AppState::new(Arc::new(pool), cfg));
        let router = app_router(state.clone());

        Self { router, state }
    }

    /// Issue one request against the in-process router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let request = match body {
            Some(json) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("request builds"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("request builds"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router handles request")
    }

    pub fn db(&self) -> &sea_orm::DatabaseConnection {
        self.state.db.as_ref()
    }
}

/// Decode a response body as JSON.
pub async fn response_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub async fn seed_supplier(app: &TestApp, name: &str) -> supplier::Model {
    supplier::ActiveModel {
        supplier_name: Set(name.to_string()),
        contact_name: Set(format!("{name} contact")),
        email: Set(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone: Set("555-0100".to_string()),
        ..Default::default()
    }
    .insert(app.db())
    .await
    .expect("seed supplier")
}

pub async fn seed_product(
    app: &TestApp,
    name: &str,
    category: &str,
    price: Decimal,
    stock: i32,
    reorder_level: i32,
    supplier_id: i32,
) -> product::Model {
    product::ActiveModel {
        product_name: Set(name.to_string()),
        category: Set(category.to_string()),
        price: Set(price),
        stock_quantity: Set(stock),
        reorder_level: Set(reorder_level),
        supplier_id: Set(supplier_id),
        ..Default::default()
    }
    .insert(app.db())
    .await
    .expect("seed product")
}

pub async fn seed_stock_entry(
    app: &TestApp,
    product_id: i32,
    change_type: ChangeType,
    quantity: i32,
    entry_date: DateTime<Utc>,
) -> stock_entry::Model {
    stock_entry::ActiveModel {
        product_id: Set(product_id),
        change_type: Set(change_type),
        change_quantity: Set(quantity),
        entry_date: Set(entry_date),
        ..Default::default()
    }
    .insert(app.db())
    .await
    .expect("seed stock entry")
}
