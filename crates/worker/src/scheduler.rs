//! Poll loop driving a [`JobProcessor`].
//!
//! Polls fire on a fixed interval and whenever the wakeup listener signals
//! a newly queued job. Each poll runs on its own task so a hung orchestrator
//! call never blocks the loop; the processor's guard turns overlapping
//! polls into no-ops.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::client::MatchInvoker;
use crate::processor::{JobProcessor, PollOutcome};
use crate::queue::JobQueue;

/// How long shutdown waits for an in-flight poll to finish.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Run the poll loop until `cancel` is triggered.
pub async fn run<Q, I>(
    processor: Arc<JobProcessor<Q, I>>,
    poll_interval: Duration,
    wakeup: Arc<Notify>,
    cancel: CancellationToken,
) where
    Q: JobQueue + 'static,
    I: MatchInvoker + 'static,
{
    tracing::info!(
        interval_secs = poll_interval.as_secs(),
        "Match job scheduler started"
    );

    let tracker = TaskTracker::new();
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Match job scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                spawn_poll(&tracker, &processor, "interval");
            }
            _ = wakeup.notified() => {
                spawn_poll(&tracker, &processor, "notify");
            }
        }
    }

    tracker.close();
    if tokio::time::timeout(DRAIN_TIMEOUT, tracker.wait()).await.is_err() {
        tracing::warn!(
            timeout_secs = DRAIN_TIMEOUT.as_secs(),
            "In-flight match job poll did not finish before shutdown"
        );
    }
}

fn spawn_poll<Q, I>(tracker: &TaskTracker, processor: &Arc<JobProcessor<Q, I>>, trigger: &'static str)
where
    Q: JobQueue + 'static,
    I: MatchInvoker + 'static,
{
    let processor = Arc::clone(processor);
    tracker.spawn(async move {
        match processor.poll().await {
            PollOutcome::Skipped => {
                tracing::debug!(trigger, "Match job poll skipped, previous poll still running");
            }
            PollOutcome::Processed(report) if report.claimed == 0 && report.store_errors == 0 => {
                tracing::debug!(trigger, "No match jobs due");
            }
            PollOutcome::Processed(report) => {
                tracing::info!(
                    trigger,
                    claimed = report.claimed,
                    completed = report.completed,
                    retrying = report.retrying,
                    dead = report.dead,
                    store_errors = report.store_errors,
                    "Match job poll finished"
                );
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use curio_core::request::MatchRequest;
    use curio_core::types::{DbId, Timestamp};
    use curio_db::models::match_job::MatchJob;

    use super::*;
    use crate::client::{InvokeError, InvokeOutcome};
    use crate::processor::ProcessorConfig;

    /// Counts claims; never hands out a job.
    #[derive(Default)]
    struct CountingQueue {
        claims: AtomicUsize,
        claimed: Notify,
    }

    #[async_trait]
    impl JobQueue for CountingQueue {
        async fn claim(&self, _limit: i64) -> Result<Vec<MatchJob>, sqlx::Error> {
            self.claims.fetch_add(1, Ordering::SeqCst);
            self.claimed.notify_one();
            Ok(Vec::new())
        }

        async fn complete(&self, _job_id: DbId) -> Result<(), sqlx::Error> {
            Ok(())
        }

        async fn fail(&self, _: DbId, _: &str, _: Timestamp) -> Result<(), sqlx::Error> {
            Ok(())
        }

        async fn bury(&self, _: DbId, _: &str) -> Result<(), sqlx::Error> {
            Ok(())
        }
    }

    struct NoopInvoker;

    #[async_trait]
    impl MatchInvoker for NoopInvoker {
        async fn invoke(&self, _request: MatchRequest) -> Result<InvokeOutcome, InvokeError> {
            Ok(InvokeOutcome {
                success: true,
                matches_created: 0,
            })
        }
    }

    async fn next_claim(queue: &CountingQueue) {
        tokio::time::timeout(Duration::from_secs(5), queue.claimed.notified())
            .await
            .expect("expected a poll");
    }

    #[tokio::test]
    async fn polls_immediately_and_on_wakeup_then_stops() {
        let processor = Arc::new(JobProcessor::new(
            CountingQueue::default(),
            NoopInvoker,
            ProcessorConfig::default(),
        ));
        let wakeup = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(run(
            Arc::clone(&processor),
            Duration::from_secs(3600),
            Arc::clone(&wakeup),
            cancel.clone(),
        ));

        // First interval tick fires at once.
        next_claim(processor.queue()).await;

        wakeup.notify_one();
        next_claim(processor.queue()).await;
        assert_eq!(processor.queue().claims.load(Ordering::SeqCst), 2);

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler should stop on cancel")
            .unwrap();
    }
}
