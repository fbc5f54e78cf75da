use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::JobStore;
use crate::error::AppError;
use crate::models::job::{Job, JobListing};

/// In-process store used when no database is configured.
#[derive(Default)]
pub struct MemoryJobStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    jobs: Vec<Job>,
    last_id: i64,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn find_all(&self) -> Result<Vec<Job>, AppError> {
        Ok(self.inner.read().await.jobs.clone())
    }

    async fn save_all(&self, listings: &[JobListing]) -> Result<Vec<Job>, AppError> {
        let mut inner = self.inner.write().await;
        let now = Utc::now();
        let mut saved = Vec::with_capacity(listings.len());
        for listing in listings {
            inner.last_id += 1;
            saved.push(Job {
                id: inner.last_id,
                listing: listing.clone(),
                created_at: now,
            });
        }
        inner.jobs.extend(saved.iter().cloned());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.jobs.len();
        inner.jobs.retain(|job| job.id != id);
        if inner.jobs.len() == before {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
