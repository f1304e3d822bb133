//! # Product API Server
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product API Server                               │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► ProductService ───► PostgreSQL (6432)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup: logging → config → pool + migrations → router → serve.
//! Shutdown: Ctrl+C or SIGTERM drains in-flight requests, then the pool is
//! closed.

use std::sync::Arc;

use anyhow::Context;
use product_api::{app, AppConfig, AppState, ProductService};
use product_db::Database;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Product API server...");

    let config = AppConfig::load().context("loading configuration")?;
    info!(
        bind = %config.server.bind_address(),
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.name,
        "Configuration loaded"
    );

    let db = Database::new(config.database.to_db_config())
        .await
        .context("connecting to database")?;
    info!("Connected to PostgreSQL");

    let service = ProductService::new(Arc::new(db.products()));
    let router = app(AppState::new(service));

    let bind_addr = config.server.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
