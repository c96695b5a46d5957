// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Demoday Server entrypoint.
//!
//! Loads configuration, connects to PostgreSQL or SQLite depending on the
//! database URL scheme, runs migrations, and serves the API until a
//! shutdown signal arrives.

use std::sync::Arc;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

use demoday_core::config::Config;
use demoday_core::handlers::PresentationHandlerState;
use demoday_core::persistence::{Persistence, PostgresPersistence, SqlitePersistence};
use demoday_server::{AppState, build_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (from crate directory or parent directories)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("demoday_core=info".parse().unwrap())
                .add_directive("demoday_server=info".parse().unwrap()),
        )
        .init();

    info!("Starting Demoday Server");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        http_addr = %config.http_addr,
        max_page_size = config.max_page_size,
        "Configuration loaded"
    );

    // Connect to the database; the URL scheme picks the backend
    let persistence: Arc<dyn Persistence> =
        if let Some(path) = config.database_url.strip_prefix("sqlite:") {
            info!(path, "Opening SQLite database");
            Arc::new(SqlitePersistence::from_path(path).await?)
        } else {
            info!("Connecting to PostgreSQL...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(&config.database_url)
                .await?;
            info!("Database connection established");

            info!("Running database migrations...");
            demoday_core::migrations::run_postgres(&pool).await?;
            info!("Migrations completed");

            Arc::new(PostgresPersistence::new(pool))
        };

    let handlers = Arc::new(
        PresentationHandlerState::new(persistence).with_max_page_size(config.max_page_size),
    );
    let app = build_router(AppState { handlers });

    let listener = tokio::net::TcpListener::bind(config.http_addr).await?;
    info!(addr = %config.http_addr, "Demoday Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}
