// HTTP API routes

pub mod applied_jobs;
pub mod common;
pub mod health;
pub mod jobs;

pub use common::{ApiError, ApiResult, ErrorResponse};
