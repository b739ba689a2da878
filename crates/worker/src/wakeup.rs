//! Postgres `LISTEN` wakeup for the scheduler.
//!
//! The `match_jobs` insert trigger calls `pg_notify('match_jobs', id)`.
//! Each notification becomes a single [`Notify`] permit, so a burst of
//! inserts collapses into one extra poll. Lost connections are retried;
//! while disconnected the scheduler's interval keeps jobs moving.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgListener;
use sqlx::PgPool;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

/// Channel the insert trigger notifies on.
pub const MATCH_JOBS_CHANNEL: &str = "match_jobs";

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Forward `match_jobs` notifications to `wakeup` until `cancel` fires.
pub async fn listen(pool: PgPool, wakeup: Arc<Notify>, cancel: CancellationToken) {
    loop {
        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = forward(&pool, &wakeup) => result,
        };

        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                retry_in_secs = RECONNECT_DELAY.as_secs(),
                "Match job listener disconnected"
            );
        }

        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(RECONNECT_DELAY) => {}
        }
    }

    tracing::info!("Match job listener stopping");
}

async fn forward(pool: &PgPool, wakeup: &Notify) -> Result<(), sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(MATCH_JOBS_CHANNEL).await?;
    tracing::info!(channel = MATCH_JOBS_CHANNEL, "Listening for queued match jobs");

    loop {
        let notification = listener.recv().await?;
        tracing::debug!(job_id = notification.payload(), "Match job queued");
        wakeup.notify_one();
    }
}
