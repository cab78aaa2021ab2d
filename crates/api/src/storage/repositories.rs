// PostgreSQL repository for jobs and applications

use anyhow::{Context, Result};
use jobnest_core::{AppliedJob, JobFields, UpdateResult};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use super::models::{AppliedJobRow, JobRow};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

const JOB_COLUMNS: &str = r#"
    id, job_banner_url, job_title, logged_in_user_name, job_category, salary_range,
    job_description, job_posting_date, application_deadline, job_applicants_number,
    user_email, created_at, updated_at
"#;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("Failed to connect to Postgres")?;
        Ok(Self { pool })
    }

    /// Apply the bootstrap schema
    pub async fn run_migrations(&self) -> Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("Failed to apply database schema")?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ============================================
    // Jobs
    // ============================================

    pub async fn list_jobs(&self) -> Result<Vec<JobRow>> {
        let rows = sqlx::query_as::<_, JobRow>(&format!("SELECT {} FROM jobs", JOB_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {} FROM jobs WHERE id = $1",
            JOB_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_job(&self, id: Uuid, input: JobFields) -> Result<JobRow> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (
                id, job_banner_url, job_title, logged_in_user_name, job_category, salary_range,
                job_description, job_posting_date, application_deadline, job_applicants_number,
                user_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            JOB_COLUMNS
        ))
        .bind(id)
        .bind(&input.job_banner_url)
        .bind(&input.job_title)
        .bind(&input.logged_in_user_name)
        .bind(&input.job_category)
        .bind(&input.salary_range)
        .bind(&input.job_description)
        .bind(&input.job_posting_date)
        .bind(&input.application_deadline)
        .bind(input.job_applicants_number)
        .bind(&input.user_email)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Overwrite every field of the job, creating it when `id` is unknown.
    ///
    /// The conflict branch only fires when something actually differs, so an
    /// identical overwrite returns no row and reports as unchanged.
    pub async fn upsert_job(&self, id: Uuid, input: JobFields) -> Result<UpdateResult> {
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO jobs (
                id, job_banner_url, job_title, logged_in_user_name, job_category, salary_range,
                job_description, job_posting_date, application_deadline, job_applicants_number,
                user_email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                job_banner_url = EXCLUDED.job_banner_url,
                job_title = EXCLUDED.job_title,
                logged_in_user_name = EXCLUDED.logged_in_user_name,
                job_category = EXCLUDED.job_category,
                salary_range = EXCLUDED.salary_range,
                job_description = EXCLUDED.job_description,
                job_posting_date = EXCLUDED.job_posting_date,
                application_deadline = EXCLUDED.application_deadline,
                job_applicants_number = EXCLUDED.job_applicants_number,
                user_email = EXCLUDED.user_email,
                updated_at = NOW()
            WHERE (
                jobs.job_banner_url, jobs.job_title, jobs.logged_in_user_name, jobs.job_category,
                jobs.salary_range, jobs.job_description, jobs.job_posting_date,
                jobs.application_deadline, jobs.job_applicants_number, jobs.user_email
            ) IS DISTINCT FROM (
                EXCLUDED.job_banner_url, EXCLUDED.job_title, EXCLUDED.logged_in_user_name,
                EXCLUDED.job_category, EXCLUDED.salary_range, EXCLUDED.job_description,
                EXCLUDED.job_posting_date, EXCLUDED.application_deadline,
                EXCLUDED.job_applicants_number, EXCLUDED.user_email
            )
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(id)
        .bind(&input.job_banner_url)
        .bind(&input.job_title)
        .bind(&input.logged_in_user_name)
        .bind(&input.job_category)
        .bind(&input.salary_range)
        .bind(&input.job_description)
        .bind(&input.job_posting_date)
        .bind(&input.application_deadline)
        .bind(input.job_applicants_number)
        .bind(&input.user_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            Some(true) => UpdateResult::upserted(id),
            Some(false) => UpdateResult::modified(),
            None => UpdateResult::unchanged(),
        })
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============================================
    // Applications
    // ============================================

    pub async fn list_applied_jobs(&self) -> Result<Vec<AppliedJobRow>> {
        let rows = sqlx::query_as::<_, AppliedJobRow>(
            "SELECT id, job_id, document, created_at FROM applied_jobs",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count the application against its job and record it, in one transaction.
    ///
    /// Returns whether a job with the referenced id existed.
    pub async fn apply_to_job(&self, application: &AppliedJob) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let matched = sqlx::query(
            r#"
            UPDATE jobs
            SET job_applicants_number = job_applicants_number + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(application.job_id)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        sqlx::query("INSERT INTO applied_jobs (id, job_id, document) VALUES ($1, $2, $3)")
            .bind(application.id)
            .bind(application.job_id)
            .bind(sqlx::types::Json(&application.fields))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(matched)
    }
}
