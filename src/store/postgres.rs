use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::JobStore;
use crate::error::AppError;
use crate::models::job::{Job, JobListing};

pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn find_all(&self) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    async fn save_all(&self, listings: &[JobListing]) -> Result<Vec<Job>, AppError> {
        if listings.is_empty() {
            return Ok(Vec::new());
        }

        // One multi-row INSERT is a single atomic statement.
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO jobs (title, company, location, description, url, source, placeholder) ",
        );
        builder.push_values(listings, |mut row, listing| {
            row.push_bind(&listing.title)
                .push_bind(&listing.company)
                .push_bind(&listing.location)
                .push_bind(&listing.description)
                .push_bind(&listing.url)
                .push_bind(&listing.source)
                .push_bind(listing.placeholder);
        });
        builder.push(" RETURNING *");

        let mut jobs = builder
            .build_query_as::<Job>()
            .fetch_all(&self.pool)
            .await?;
        // BIGSERIAL ids follow the VALUES order.
        jobs.sort_by_key(|job| job.id);
        Ok(jobs)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Job {id} not found")));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
