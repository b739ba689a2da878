use std::sync::Arc;

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use curio_worker::client::HttpMatchInvoker;
use curio_worker::config::WorkerConfig;
use curio_worker::processor::JobProcessor;
use curio_worker::queue::PgJobQueue;
use curio_worker::{scheduler, wakeup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "curio_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    tracing::info!(
        api_url = %config.api_url,
        batch_size = config.processor.batch_size,
        max_attempts = config.processor.retry.max_attempts,
        "Loaded worker configuration"
    );

    // --- Database ---
    let pool = curio_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    curio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database connection pool created");

    // --- Processor ---
    let invoker = HttpMatchInvoker::new(&config.api_url, &config.api_token, config.api_timeout)
        .expect("Failed to build matching API client");
    let queue = PgJobQueue::new(pool.clone(), config.job_lease);
    let processor = Arc::new(JobProcessor::new(queue, invoker, config.processor));

    // --- Background tasks ---
    let cancel = CancellationToken::new();
    let wakeup_signal = Arc::new(Notify::new());

    let listener = tokio::spawn(wakeup::listen(
        pool.clone(),
        Arc::clone(&wakeup_signal),
        cancel.clone(),
    ));
    let scheduler = tokio::spawn(scheduler::run(
        processor,
        config.poll_interval,
        wakeup_signal,
        cancel.clone(),
    ));

    shutdown_signal().await;
    cancel.cancel();

    let _ = listener.await;
    let _ = scheduler.await;
    pool.close().await;

    tracing::info!("Worker stopped");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
