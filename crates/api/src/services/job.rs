// Job service for business logic

use crate::storage::StorageBackend;
use anyhow::Result;
use jobnest_core::{new_id, DeleteResult, InsertResult, Job, JobPayload, UpdateResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct JobService {
    db: Arc<StorageBackend>,
}

impl JobService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        let rows = self.db.list_jobs().await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Job>> {
        let row = self.db.get_job(id).await?;
        Ok(row.map(Job::from))
    }

    /// Store a new posting under a fresh identifier.
    ///
    /// The applicant count is taken from the payload as submitted. A non-zero
    /// starting count is stored but logged.
    pub async fn create(&self, payload: JobPayload) -> Result<InsertResult> {
        let fields = payload.into_fields();
        if fields.job_applicants_number != 0 {
            tracing::warn!(
                job_applicants_number = fields.job_applicants_number,
                "job created with a non-zero applicant count"
            );
        }

        let row = self.db.create_job(new_id(), fields).await?;
        tracing::info!(job_id = %row.id, job_title = %row.job_title, "job created");
        Ok(InsertResult::new(row.id))
    }

    /// Overwrite every field of the job, creating it when `id` is unknown.
    pub async fn update(&self, id: Uuid, payload: JobPayload) -> Result<UpdateResult> {
        let result = self.db.upsert_job(id, payload.into_fields()).await?;
        if result.upserted_id.is_some() {
            tracing::info!(job_id = %id, "job update created a new posting");
        }
        Ok(result)
    }

    /// Applications referencing the job are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<DeleteResult> {
        let deleted = self.db.delete_job(id).await?;
        if deleted {
            tracing::info!(job_id = %id, "job deleted");
        }
        Ok(DeleteResult::new(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> JobService {
        JobService::new(Arc::new(StorageBackend::in_memory()))
    }

    fn payload(value: serde_json::Value) -> JobPayload {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_coerces_count() {
        let service = service();
        let result = service
            .create(payload(json!({"jobTitle": "Rust dev", "jobApplicantsNumber": "3 applicants"})))
            .await
            .unwrap();

        let job = service.get(result.inserted_id).await.unwrap().unwrap();
        assert_eq!(job.fields.job_title, "Rust dev");
        assert_eq!(job.fields.job_applicants_number, 3);
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let service = service();
        let a = service.create(JobPayload::default()).await.unwrap();
        let b = service.create(JobPayload::default()).await.unwrap();
        assert_ne!(a.inserted_id, b.inserted_id);
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_unknown_id_upserts() {
        let service = service();
        let id = new_id();
        let result = service
            .update(id, payload(json!({"jobTitle": "New"})))
            .await
            .unwrap();

        assert_eq!(result, UpdateResult::upserted(id));
        assert_eq!(service.get(id).await.unwrap().unwrap().fields.job_title, "New");
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let service = service();
        let id = service
            .create(payload(json!({"jobTitle": "Old", "salaryRange": "$1"})))
            .await
            .unwrap()
            .inserted_id;

        let result = service
            .update(id, payload(json!({"jobTitle": "New"})))
            .await
            .unwrap();
        assert_eq!(result, UpdateResult::modified());

        let job = service.get(id).await.unwrap().unwrap();
        assert_eq!(job.fields.job_title, "New");
        assert_eq!(job.fields.salary_range, "");
    }

    #[tokio::test]
    async fn test_delete_reports_count() {
        let service = service();
        let id = service.create(JobPayload::default()).await.unwrap().inserted_id;

        assert_eq!(service.delete(id).await.unwrap().deleted_count, 1);
        assert_eq!(service.delete(id).await.unwrap().deleted_count, 0);
        assert!(service.get(id).await.unwrap().is_none());
    }
}
