// JobNest API server
// Decision: Storage is opened once at startup and closed after graceful shutdown

use anyhow::{Context, Result};
use jobnest_api::{build_router, config::AppConfig, storage::StorageBackend};
use jobnest_core::telemetry::{init_tracing, TelemetryConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real environment variables take precedence
    let _ = dotenvy::dotenv();

    // Configure via environment variables:
    // - RUST_LOG / LOG_LEVEL: Log filter (default: "jobnest_api=debug,tower_http=debug")
    // - LOG_FORMAT=json: JSON log lines
    let mut telemetry_config = TelemetryConfig::from_env();
    if telemetry_config.service_name == "jobnest" {
        telemetry_config.service_name = "jobnest-api".to_string();
    }
    if telemetry_config.log_filter.is_none() {
        telemetry_config.log_filter = Some("jobnest_api=debug,tower_http=debug".to_string());
    }
    telemetry_config.service_version = Some(env!("CARGO_PKG_VERSION").to_string());
    init_tracing(telemetry_config);

    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        mode = ?config.mode,
        cors_origins = ?config.cors_origins,
        secure_cookies = config.auth.cookie_secure,
        "Configuration loaded"
    );
    if config.auth.secret.is_none() {
        tracing::warn!("ACCESS_TOKEN_SECRET not set; sign-in and protected routes will fail");
    }

    let db = StorageBackend::connect(config.database_url.as_deref())
        .await
        .context("Failed to initialize storage")?;
    db.ping().await.context("Storage is not reachable")?;
    tracing::info!(storage = db.name(), "Connected to storage");

    let db = Arc::new(db);
    let app = build_router(&config, db.clone());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!(port = config.port, "job-nest-server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("shutting down, closing storage");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
