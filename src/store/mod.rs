// Persistence for listings. The search pipeline only needs bulk append,
// read-all and delete.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::job::{Job, JobListing};

#[async_trait]
pub trait JobStore: Send + Sync {
    /// All stored listings in insertion order.
    async fn find_all(&self) -> Result<Vec<Job>, AppError>;

    /// Persist `listings` as one atomic write. Returns the stored records in
    /// input order.
    async fn save_all(&self, listings: &[JobListing]) -> Result<Vec<Job>, AppError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

pub use memory::MemoryJobStore;
pub use postgres::PgJobStore;
