use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;

use crate::auth::TokenAuthority;
use crate::config::AppConfig;
use crate::database::{DatabaseManager, PgCatalog};
use crate::state::AppState;

pub async fn handle(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = port {
        config.server.port = port;
    }
    tracing::info!("Starting Casa Catalog in {:?} mode", config.environment);

    let tokens = TokenAuthority::new(&config.security.jwt_secret, Duration::days(config.security.session_ttl_days))
        .context("invalid JWT_SECRET")?;

    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be set to serve")?;
    let pool = DatabaseManager::connect(&database_url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let state = AppState::new(config, tokens, Arc::new(PgCatalog::new(pool)));
    let app = crate::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Casa Catalog listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
