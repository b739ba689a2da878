//! Repository for the `match_jobs` table.
//!
//! Claiming is a single `UPDATE ... WHERE id IN (SELECT ... FOR UPDATE SKIP
//! LOCKED)` so concurrent workers never claim the same job. A claim stamps
//! `claimed_at` and bumps `attempts`; a claim older than the lease is
//! treated as abandoned and may be taken over.

use std::time::Duration;

use curio_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::match_job::{EnqueueMatchJob, MatchJob};
use crate::models::status::MatchJobStatus;

/// Column list for `match_jobs` queries.
const COLUMNS: &str = "\
    id, job_type, reference_id, status, attempts, error_message, \
    claimed_at, next_attempt_at, processed_at, created_at, updated_at";

/// Parameters for [`MatchJobRepo::claim_batch`].
#[derive(Debug, Clone, Copy)]
pub struct ClaimOptions {
    /// Maximum number of jobs to claim.
    pub limit: i64,
    /// How long a `processing` claim is honoured before it may be taken over.
    pub lease: Duration,
}

/// Provides queue operations for match jobs.
pub struct MatchJobRepo;

impl MatchJobRepo {
    /// Queue a new pending job.
    pub async fn enqueue(pool: &PgPool, input: &EnqueueMatchJob) -> Result<MatchJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO match_jobs (job_type, reference_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MatchJob>(&query)
            .bind(input.job_type)
            .bind(input.reference_id)
            .bind(MatchJobStatus::Pending)
            .fetch_one(pool)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MatchJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM match_jobs WHERE id = $1");
        sqlx::query_as::<_, MatchJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically claim up to `options.limit` jobs, oldest first.
    ///
    /// Eligible jobs are `pending` ones, `failed` ones whose backoff has
    /// elapsed, and `processing` ones whose lease has expired. Claimed jobs
    /// are returned in creation order.
    pub async fn claim_batch(
        pool: &PgPool,
        options: ClaimOptions,
    ) -> Result<Vec<MatchJob>, sqlx::Error> {
        let query = format!(
            "UPDATE match_jobs \
             SET status = $1, claimed_at = NOW(), attempts = attempts + 1 \
             WHERE id IN ( \
                 SELECT id FROM match_jobs \
                 WHERE status = $2 \
                    OR (status = $3 AND next_attempt_at <= NOW()) \
                    OR (status = $1 AND claimed_at < NOW() - make_interval(secs => $4)) \
                 ORDER BY created_at ASC, id ASC \
                 LIMIT $5 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        let mut jobs = sqlx::query_as::<_, MatchJob>(&query)
            .bind(MatchJobStatus::Processing)
            .bind(MatchJobStatus::Pending)
            .bind(MatchJobStatus::Failed)
            .bind(options.lease.as_secs_f64())
            .bind(options.limit)
            .fetch_all(pool)
            .await?;

        jobs.sort_by_key(|job| (job.created_at, job.id));
        Ok(jobs)
    }

    /// Mark a job as completed, clearing any earlier error.
    pub async fn complete(pool: &PgPool, job_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE match_jobs \
             SET status = $2, processed_at = NOW(), error_message = NULL, next_attempt_at = NULL \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(MatchJobStatus::Completed)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as failed; it becomes claimable again at `retry_at`.
    pub async fn fail(
        pool: &PgPool,
        job_id: DbId,
        error: &str,
        retry_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE match_jobs \
             SET status = $2, error_message = $3, processed_at = NOW(), next_attempt_at = $4 \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(MatchJobStatus::Failed)
        .bind(error)
        .bind(retry_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a job as dead. It will not be claimed again.
    pub async fn bury(pool: &PgPool, job_id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE match_jobs \
             SET status = $2, error_message = $3, processed_at = NOW(), next_attempt_at = NULL \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(MatchJobStatus::Dead)
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Move a `failed` or `dead` job back to `pending` with a fresh attempt count.
    ///
    /// Returns `None` if the job does not exist or is in any other status.
    pub async fn requeue(pool: &PgPool, job_id: DbId) -> Result<Option<MatchJob>, sqlx::Error> {
        let query = format!(
            "UPDATE match_jobs \
             SET status = $2, attempts = 0, error_message = NULL, claimed_at = NULL, \
                 next_attempt_at = NULL, processed_at = NULL \
             WHERE id = $1 AND status IN ($3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MatchJob>(&query)
            .bind(job_id)
            .bind(MatchJobStatus::Pending)
            .bind(MatchJobStatus::Failed)
            .bind(MatchJobStatus::Dead)
            .fetch_optional(pool)
            .await
    }

    /// Number of jobs in each status. Statuses with no jobs are omitted.
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(MatchJobStatus, i64)>, sqlx::Error> {
        sqlx::query_as::<_, (MatchJobStatus, i64)>(
            "SELECT status, COUNT(*) FROM match_jobs GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
    }
}
