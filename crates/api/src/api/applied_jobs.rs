// Application intake HTTP routes
// Decision: Only the listing is guarded; anyone may apply

use crate::auth::{authorize_owner, verify_token, AuthState, TokenClaims};
use crate::services::ApplicationService;
use crate::storage::StorageBackend;
use axum::{
    extract::{Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use jobnest_core::{AppliedJob, ApplicationPayload, InsertResult};
use serde::Deserialize;
use std::sync::Arc;

use super::common::{ApiError, ApiResult};

/// App state for application routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ApplicationService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(ApplicationService::new(db)),
        }
    }
}

/// Query parameters for listing applications
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    /// Must equal the email in the session token
    pub email: Option<String>,
}

/// Create application routes
pub fn routes(state: AppState, auth: AuthState) -> Router {
    Router::new()
        .route(
            "/appliedJobs",
            get(list_applied_jobs)
                .route_layer(middleware::from_fn_with_state(auth, verify_token))
                .post(apply_to_job),
        )
        .with_state(state)
}

/// GET /appliedJobs?email= - List every application
///
/// Requires the `token` cookie, and the token's email must match `email`.
pub async fn list_applied_jobs(
    State(state): State<AppState>,
    Extension(claims): Extension<Arc<TokenClaims>>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<Vec<AppliedJob>>, Response> {
    authorize_owner(&claims, query.email.as_deref()).map_err(IntoResponse::into_response)?;

    let applications = state
        .service
        .list()
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    Ok(Json(applications))
}

/// POST /appliedJobs - Apply to a job
pub async fn apply_to_job(
    State(state): State<AppState>,
    Json(payload): Json<ApplicationPayload>,
) -> ApiResult<Json<InsertResult>> {
    let application = state.service.prepare(payload)?;
    let result = state.service.apply(application).await?;
    Ok(Json(result))
}
