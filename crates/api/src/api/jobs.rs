// Job directory HTTP routes

use crate::services::JobService;
use crate::storage::StorageBackend;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use jobnest_core::{parse_id, DeleteResult, InsertResult, Job, JobPayload, UpdateResult};
use std::sync::Arc;

use super::common::ApiResult;

/// App state for job routes
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<JobService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            service: Arc::new(JobService::new(db)),
        }
    }
}

/// Create job routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id", get(get_job).put(update_job).delete(delete_job))
        .with_state(state)
}

/// GET /jobs - List every job
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.service.list().await?;
    Ok(Json(jobs))
}

/// GET /jobs/:id - Get job by ID
///
/// An unknown id answers 200 with a `null` body.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Job>>> {
    let id = parse_id(&id)?;
    let job = state.service.get(id).await?;
    Ok(Json(job))
}

/// POST /jobs - Create a new job
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<JobPayload>,
) -> ApiResult<Json<InsertResult>> {
    let result = state.service.create(payload).await?;
    Ok(Json(result))
}

/// PUT /jobs/:id - Overwrite a job, creating it if absent
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<JobPayload>,
) -> ApiResult<Json<UpdateResult>> {
    let id = parse_id(&id)?;
    let result = state.service.update(id, payload).await?;
    Ok(Json(result))
}

/// DELETE /jobs/:id - Delete a job
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResult>> {
    let id = parse_id(&id)?;
    let result = state.service.delete(id).await?;
    Ok(Json(result))
}
