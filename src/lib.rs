//! Stockboard API Library
//!
//! Inventory dashboard backend: overview metrics, sales and stock trend
//! aggregates, reference catalogs, tabular reports, and the reorder
//! lifecycle, served over a relational store. The presentation layer is
//! external; everything crossing this boundary is materialized plain data.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::Serialize;
use utoipa::ToSchema;

use services::{
    analytics::AnalyticsService, catalog::CatalogService, procurement::ProcurementService,
    products::ProductService, reports::ReportService, trends::TrendService,
};

/// Shared application state: the pooled connection handle plus one instance
/// of each service, all taking the pool as an explicit dependency.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub analytics: AnalyticsService,
    pub catalog: CatalogService,
    pub reports: ReportService,
    pub trends: TrendService,
    pub products: ProductService,
    pub procurement: ProcurementService,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        Self {
            analytics: AnalyticsService::new(db.clone()),
            catalog: CatalogService::new(db.clone()),
            reports: ReportService::new(db.clone()),
            trends: TrendService::new(db.clone()),
            products: ProductService::new(db.clone()),
            procurement: ProcurementService::new(db.clone()),
            db,
            config,
        }
    }
}

/// Common response envelope for successful endpoints.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}
