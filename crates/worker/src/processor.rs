//! One poll of the match job queue.
//!
//! A poll claims a batch, then handles each job in claim order: call the
//! matching API, then mark the job `completed`, `failed` (retry later) or
//! `dead`. A failure on one job never stops the rest of the batch.
//!
//! At most one poll runs per processor at a time. A poll triggered while
//! another is in flight returns [`PollOutcome::Skipped`] immediately, so a
//! hung orchestrator call holds back later polls without stacking them up.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use curio_db::models::match_job::MatchJob;

use crate::client::MatchInvoker;
use crate::queue::JobQueue;
use crate::retry::{FailureAction, RetryPolicy};

/// Default number of jobs claimed per poll.
pub const DEFAULT_BATCH_SIZE: i64 = 5;

/// Tunables for [`JobProcessor`].
#[derive(Debug, Clone, Copy)]
pub struct ProcessorConfig {
    pub batch_size: i64,
    pub retry: RetryPolicy,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            retry: RetryPolicy::default(),
        }
    }
}

/// Per-poll counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollReport {
    pub claimed: usize,
    pub completed: usize,
    pub retrying: usize,
    pub dead: usize,
    /// Queue writes that failed; the affected job is left for lease expiry.
    pub store_errors: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Another poll was already running.
    Skipped,
    Processed(PollReport),
}

/// Claims and runs match jobs.
pub struct JobProcessor<Q, I> {
    queue: Q,
    invoker: I,
    config: ProcessorConfig,
    polling: AtomicBool,
}

impl<Q: JobQueue, I: MatchInvoker> JobProcessor<Q, I> {
    pub fn new(queue: Q, invoker: I, config: ProcessorConfig) -> Self {
        Self {
            queue,
            invoker,
            config,
            polling: AtomicBool::new(false),
        }
    }

    pub fn queue(&self) -> &Q {
        &self.queue
    }

    /// Whether a poll is currently in flight.
    pub fn is_polling(&self) -> bool {
        self.polling.load(Ordering::Acquire)
    }

    /// Run one poll unless another is already in flight.
    pub async fn poll(&self) -> PollOutcome {
        let Some(_guard) = PollGuard::acquire(&self.polling) else {
            return PollOutcome::Skipped;
        };

        let mut report = PollReport::default();
        let jobs = match self.queue.claim(self.config.batch_size).await {
            Ok(jobs) => jobs,
            Err(e) => {
                tracing::error!(error = %e, "Failed to claim match jobs");
                report.store_errors += 1;
                return PollOutcome::Processed(report);
            }
        };
        report.claimed = jobs.len();

        for job in &jobs {
            self.process(job, &mut report).await;
        }

        PollOutcome::Processed(report)
    }

    async fn process(&self, job: &MatchJob, report: &mut PollReport) {
        let retry = &self.config.retry;

        if retry.is_exhausted(job.attempts) {
            let error = format!("Abandoned after {} attempts", retry.max_attempts);
            tracing::warn!(job_id = job.id, attempts = job.attempts, "Burying abandoned match job");
            self.record(job, self.queue.bury(job.id, &error).await, report, |r| {
                r.dead += 1
            });
            return;
        }

        let request = job.request();
        tracing::debug!(
            job_id = job.id,
            mode = request.mode(),
            reference_id = request.reference_id(),
            attempt = job.attempts,
            "Running match job"
        );

        match self.invoker.invoke(request).await {
            Ok(outcome) => {
                tracing::info!(
                    job_id = job.id,
                    matches_created = outcome.matches_created,
                    "Match job completed"
                );
                self.record(job, self.queue.complete(job.id).await, report, |r| {
                    r.completed += 1
                });
            }
            Err(e) => {
                let error = e.to_string();
                match retry.on_failure(job.attempts, e.is_retryable()) {
                    FailureAction::Retry { after } => {
                        tracing::warn!(
                            job_id = job.id,
                            attempt = job.attempts,
                            retry_in_secs = after.as_secs(),
                            error = %error,
                            "Match job failed, will retry"
                        );
                        let retry_at = retry.retry_at(Utc::now(), job.attempts);
                        self.record(
                            job,
                            self.queue.fail(job.id, &error, retry_at).await,
                            report,
                            |r| r.retrying += 1,
                        );
                    }
                    FailureAction::Bury => {
                        tracing::error!(
                            job_id = job.id,
                            attempt = job.attempts,
                            error = %error,
                            "Match job failed permanently"
                        );
                        self.record(job, self.queue.bury(job.id, &error).await, report, |r| {
                            r.dead += 1
                        });
                    }
                }
            }
        }
    }

    fn record(
        &self,
        job: &MatchJob,
        result: Result<(), sqlx::Error>,
        report: &mut PollReport,
        count: impl FnOnce(&mut PollReport),
    ) {
        match result {
            Ok(()) => count(report),
            Err(e) => {
                report.store_errors += 1;
                tracing::error!(job_id = job.id, error = %e, "Failed to update match job");
            }
        }
    }
}

/// Holds the polling flag for the lifetime of one poll.
struct PollGuard<'a>(&'a AtomicBool);

impl<'a> PollGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for PollGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
