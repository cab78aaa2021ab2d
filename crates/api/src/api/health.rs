// Liveness and health routes

use crate::storage::StorageBackend;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Plaintext body of the liveness route
pub const LIVENESS_MESSAGE: &str = "job-nest-server is running";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
}

/// State for health endpoint
#[derive(Clone)]
pub struct HealthState {
    pub db: Arc<StorageBackend>,
}

/// Create liveness and health routes
pub fn routes(state: HealthState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .with_state(state)
}

/// GET / - Liveness probe
pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health - Report service and storage status
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code) = match state.db.ping().await {
        Ok(()) => ("ok", StatusCode::OK),
        Err(e) => {
            tracing::warn!("storage ping failed: {:#}", e);
            ("unavailable", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage: state.db.name().to_string(),
        }),
    )
}
