use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use tokio::signal;
use tracing::{error, info, warn};

use stockboard_api as api;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // A connection failure is fatal to the whole session: nothing below can
    // run without the store.
    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let db = Arc::new(db_pool);
    let state = Arc::new(api::AppState::new(db.clone(), cfg.clone()));
    let app = api::handlers::app_router(state);

    let addr: SocketAddr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the pool on the way out, including the ctrl-c path.
    match Arc::try_unwrap(db) {
        Ok(pool) => {
            if let Err(e) = api::db::close_pool(pool).await {
                error!("Failed closing connection pool: {}", e);
            }
        }
        Err(_) => warn!("Connection pool still shared at shutdown, skipping explicit close"),
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
