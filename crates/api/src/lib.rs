// JobNest API Library
// Decision: Router assembly lives here so integration tests drive the same app as the binary

// API routes and types
pub mod api;

// Authentication module
pub mod auth;

// Runtime configuration
pub mod config;

// Services layer
pub mod services;

// Storage layer
pub mod storage;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::storage::StorageBackend;

/// Assemble every route with CORS and request tracing applied.
pub fn build_router(config: &AppConfig, db: Arc<StorageBackend>) -> Router {
    let auth_state = auth::AuthState::new(config.auth.clone());
    let jobs_state = api::jobs::AppState::new(db.clone());
    let applied_jobs_state = api::applied_jobs::AppState::new(db.clone());
    let health_state = api::health::HealthState { db };

    let app = Router::new()
        .merge(api::health::routes(health_state))
        .merge(auth::routes(auth_state.clone()))
        .merge(api::jobs::routes(jobs_state))
        .merge(api::applied_jobs::routes(applied_jobs_state, auth_state));

    app.layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Credentialed CORS for the configured browser origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .allow_credentials(true)
}
