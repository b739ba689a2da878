//! Job queue seam for the processor.

use std::time::Duration;

use async_trait::async_trait;
use curio_core::types::{DbId, Timestamp};
use curio_db::models::match_job::MatchJob;
use curio_db::repositories::{ClaimOptions, MatchJobRepo};
use sqlx::PgPool;

/// Queue operations the processor needs.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Claim up to `limit` jobs, oldest first, marking them `processing`.
    async fn claim(&self, limit: i64) -> Result<Vec<MatchJob>, sqlx::Error>;

    async fn complete(&self, job_id: DbId) -> Result<(), sqlx::Error>;

    async fn fail(&self, job_id: DbId, error: &str, retry_at: Timestamp)
        -> Result<(), sqlx::Error>;

    async fn bury(&self, job_id: DbId, error: &str) -> Result<(), sqlx::Error>;
}

/// [`JobQueue`] over the `match_jobs` table.
pub struct PgJobQueue {
    pool: PgPool,
    lease: Duration,
}

impl PgJobQueue {
    /// `lease` is how long a claim is honoured before another poll may take
    /// the job over.
    pub fn new(pool: PgPool, lease: Duration) -> Self {
        Self { pool, lease }
    }
}

#[async_trait]
impl JobQueue for PgJobQueue {
    async fn claim(&self, limit: i64) -> Result<Vec<MatchJob>, sqlx::Error> {
        MatchJobRepo::claim_batch(
            &self.pool,
            ClaimOptions {
                limit,
                lease: self.lease,
            },
        )
        .await
    }

    async fn complete(&self, job_id: DbId) -> Result<(), sqlx::Error> {
        MatchJobRepo::complete(&self.pool, job_id).await
    }

    async fn fail(
        &self,
        job_id: DbId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        MatchJobRepo::fail(&self.pool, job_id, error, retry_at).await
    }

    async fn bury(&self, job_id: DbId, error: &str) -> Result<(), sqlx::Error> {
        MatchJobRepo::bury(&self.pool, job_id, error).await
    }
}
