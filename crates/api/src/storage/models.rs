// Database row types

use chrono::{DateTime, Utc};
use jobnest_core::{AppliedJob, Job, JobFields};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// Row in the `jobs` table
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub job_banner_url: String,
    pub job_title: String,
    pub logged_in_user_name: String,
    pub job_category: String,
    pub salary_range: String,
    pub job_description: String,
    pub job_posting_date: String,
    pub application_deadline: String,
    pub job_applicants_number: i64,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobRow {
    pub fn new(id: Uuid, fields: JobFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            job_banner_url: fields.job_banner_url,
            job_title: fields.job_title,
            logged_in_user_name: fields.logged_in_user_name,
            job_category: fields.job_category,
            salary_range: fields.salary_range,
            job_description: fields.job_description,
            job_posting_date: fields.job_posting_date,
            application_deadline: fields.application_deadline,
            job_applicants_number: fields.job_applicants_number,
            user_email: fields.user_email,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn fields(&self) -> JobFields {
        JobFields {
            job_banner_url: self.job_banner_url.clone(),
            job_title: self.job_title.clone(),
            logged_in_user_name: self.logged_in_user_name.clone(),
            job_category: self.job_category.clone(),
            salary_range: self.salary_range.clone(),
            job_description: self.job_description.clone(),
            job_posting_date: self.job_posting_date.clone(),
            application_deadline: self.application_deadline.clone(),
            job_applicants_number: self.job_applicants_number,
            user_email: self.user_email.clone(),
        }
    }
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job::new(
            row.id,
            JobFields {
                job_banner_url: row.job_banner_url,
                job_title: row.job_title,
                logged_in_user_name: row.logged_in_user_name,
                job_category: row.job_category,
                salary_range: row.salary_range,
                job_description: row.job_description,
                job_posting_date: row.job_posting_date,
                application_deadline: row.application_deadline,
                job_applicants_number: row.job_applicants_number,
                user_email: row.user_email,
            },
        )
    }
}

/// Row in the `applied_jobs` table
#[derive(Debug, Clone, FromRow)]
pub struct AppliedJobRow {
    pub id: Uuid,
    pub job_id: Uuid,
    /// Applicant-supplied fields
    pub document: Json<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
}

impl AppliedJobRow {
    pub fn new(application: &AppliedJob, now: DateTime<Utc>) -> Self {
        Self {
            id: application.id,
            job_id: application.job_id,
            document: Json(application.fields.clone()),
            created_at: now,
        }
    }
}

impl From<AppliedJobRow> for AppliedJob {
    fn from(row: AppliedJobRow) -> Self {
        AppliedJob {
            id: row.id,
            job_id: row.job_id,
            fields: row.document.0,
        }
    }
}
