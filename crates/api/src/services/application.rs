// Application service for business logic
// Decision: Counting and recording happen in one storage call so they cannot diverge

use crate::storage::StorageBackend;
use anyhow::Result;
use jobnest_core::{new_id, AppliedJob, ApplicationPayload, IdError, InsertResult};
use std::sync::Arc;
use tracing::Instrument;

pub struct ApplicationService {
    db: Arc<StorageBackend>,
}

impl ApplicationService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<AppliedJob>> {
        let rows = self.db.list_applied_jobs().await?;
        Ok(rows.into_iter().map(AppliedJob::from).collect())
    }

    /// Resolve the payload into an application ready to store.
    ///
    /// Fails before any write when `jobId` is missing or malformed.
    pub fn prepare(&self, payload: ApplicationPayload) -> Result<AppliedJob, IdError> {
        payload.into_applied_job(new_id())
    }

    /// Count the application against its job and record it.
    pub async fn apply(&self, application: AppliedJob) -> Result<InsertResult> {
        let span = tracing::info_span!(
            "apply_to_job",
            application_id = %application.id,
            job_id = %application.job_id,
            matched = tracing::field::Empty,
        );

        self.apply_inner(application).instrument(span).await
    }

    async fn apply_inner(&self, application: AppliedJob) -> Result<InsertResult> {
        let matched = self.db.apply_to_job(&application).await?;
        tracing::Span::current().record("matched", matched);

        if matched {
            tracing::info!("application recorded");
        } else {
            tracing::warn!("application recorded for a job that does not exist");
        }

        Ok(InsertResult::new(application.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::JobService;
    use jobnest_core::JobPayload;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ApplicationPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_apply_increments_once_and_records() {
        let db = Arc::new(StorageBackend::in_memory());
        let jobs = JobService::new(db.clone());
        let applications = ApplicationService::new(db);

        let job_id = jobs.create(JobPayload::default()).await.unwrap().inserted_id;
        let application = applications
            .prepare(payload(json!({"jobId": job_id.to_string(), "name": "Ada"})))
            .unwrap();
        let result = applications.apply(application).await.unwrap();

        let job = jobs.get(job_id).await.unwrap().unwrap();
        assert_eq!(job.fields.job_applicants_number, 1);

        let listed = applications.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, result.inserted_id);
        assert_eq!(listed[0].fields["name"], json!("Ada"));
    }

    #[tokio::test]
    async fn test_prepare_rejects_bad_job_id() {
        let applications = ApplicationService::new(Arc::new(StorageBackend::in_memory()));

        assert!(matches!(
            applications.prepare(payload(json!({"name": "Ada"}))),
            Err(IdError::Missing(_))
        ));
        assert!(matches!(
            applications.prepare(payload(json!({"jobId": "nope"}))),
            Err(IdError::Malformed(_))
        ));
        assert!(applications.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_job_still_recorded() {
        let applications = ApplicationService::new(Arc::new(StorageBackend::in_memory()));
        let application = applications
            .prepare(payload(json!({"jobId": new_id().to_string()})))
            .unwrap();

        applications.apply(application).await.unwrap();
        assert_eq!(applications.list().await.unwrap().len(), 1);
    }
}
