// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Lock order is always jobs before applied_jobs
//
// This implementation mirrors the PostgreSQL repository API backed by
// in-memory HashMaps, allowing the server to run without a database.

use anyhow::Result;
use chrono::{DateTime, Utc};
use jobnest_core::{AppliedJob, JobFields, UpdateResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::models::{AppliedJobRow, JobRow};

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    jobs: RwLock<HashMap<Uuid, JobRow>>,
    applied_jobs: RwLock<HashMap<Uuid, AppliedJobRow>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    // ============================================
    // Jobs
    // ============================================

    pub async fn list_jobs(&self) -> Result<Vec<JobRow>> {
        let mut rows: Vec<_> = self.jobs.read().values().cloned().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>> {
        Ok(self.jobs.read().get(&id).cloned())
    }

    pub async fn create_job(&self, id: Uuid, input: JobFields) -> Result<JobRow> {
        let row = JobRow::new(id, input, Self::now());
        let mut jobs = self.jobs.write();
        if jobs.contains_key(&id) {
            anyhow::bail!("duplicate job id {}", id);
        }
        jobs.insert(id, row.clone());
        Ok(row)
    }

    pub async fn upsert_job(&self, id: Uuid, input: JobFields) -> Result<UpdateResult> {
        let mut jobs = self.jobs.write();
        match jobs.get_mut(&id) {
            Some(row) if row.fields() == input => Ok(UpdateResult::unchanged()),
            Some(row) => {
                let created_at = row.created_at;
                *row = JobRow::new(id, input, Self::now());
                row.created_at = created_at;
                Ok(UpdateResult::modified())
            }
            None => {
                jobs.insert(id, JobRow::new(id, input, Self::now()));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<bool> {
        Ok(self.jobs.write().remove(&id).is_some())
    }

    // ============================================
    // Applications
    // ============================================

    pub async fn list_applied_jobs(&self) -> Result<Vec<AppliedJobRow>> {
        let mut rows: Vec<_> = self.applied_jobs.read().values().cloned().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    /// Increment and insert under both write locks, so no reader observes one
    /// without the other.
    pub async fn apply_to_job(&self, application: &AppliedJob) -> Result<bool> {
        let mut jobs = self.jobs.write();
        let mut applied_jobs = self.applied_jobs.write();

        if applied_jobs.contains_key(&application.id) {
            anyhow::bail!("duplicate application id {}", application.id);
        }

        let now = Self::now();
        let matched = match jobs.get_mut(&application.job_id) {
            Some(job) => {
                job.job_applicants_number = job
                    .job_applicants_number
                    .checked_add(1)
                    .ok_or_else(|| {
                        anyhow::anyhow!("applicant count overflow for job {}", application.job_id)
                    })?;
                job.updated_at = now;
                true
            }
            None => false,
        };

        applied_jobs.insert(application.id, AppliedJobRow::new(application, now));
        Ok(matched)
    }
}
