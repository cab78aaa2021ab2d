// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use jobnest_core::{AppliedJob, JobFields, UpdateResult};
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::{AppliedJobRow, JobRow};
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend and apply the schema
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        db.run_migrations().await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Postgres when a URL is configured, in-memory otherwise
    pub async fn connect(database_url: Option<&str>) -> Result<Self> {
        match database_url {
            Some(url) => Self::postgres(url).await,
            None => {
                tracing::warn!("no database configured, using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }

    /// Short backend name for health reporting
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "memory",
        }
    }

    pub async fn ping(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => db.ping().await,
            Self::InMemory(_) => Ok(()),
        }
    }

    pub async fn close(&self) {
        if let Self::Postgres(db) = self {
            db.close().await;
        }
    }

    // ============================================
    // Jobs
    // ============================================

    pub async fn list_jobs(&self) -> Result<Vec<JobRow>> {
        match self {
            Self::Postgres(db) => db.list_jobs().await,
            Self::InMemory(db) => db.list_jobs().await,
        }
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Option<JobRow>> {
        match self {
            Self::Postgres(db) => db.get_job(id).await,
            Self::InMemory(db) => db.get_job(id).await,
        }
    }

    pub async fn create_job(&self, id: Uuid, input: JobFields) -> Result<JobRow> {
        match self {
            Self::Postgres(db) => db.create_job(id, input).await,
            Self::InMemory(db) => db.create_job(id, input).await,
        }
    }

    pub async fn upsert_job(&self, id: Uuid, input: JobFields) -> Result<UpdateResult> {
        match self {
            Self::Postgres(db) => db.upsert_job(id, input).await,
            Self::InMemory(db) => db.upsert_job(id, input).await,
        }
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.delete_job(id).await,
            Self::InMemory(db) => db.delete_job(id).await,
        }
    }

    // ============================================
    // Applications
    // ============================================

    pub async fn list_applied_jobs(&self) -> Result<Vec<AppliedJobRow>> {
        match self {
            Self::Postgres(db) => db.list_applied_jobs().await,
            Self::InMemory(db) => db.list_applied_jobs().await,
        }
    }

    pub async fn apply_to_job(&self, application: &AppliedJob) -> Result<bool> {
        match self {
            Self::Postgres(db) => db.apply_to_job(application).await,
            Self::InMemory(db) => db.apply_to_job(application).await,
        }
    }
}
