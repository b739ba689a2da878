use std::time::Duration;

use crate::processor::{ProcessorConfig, DEFAULT_BATCH_SIZE};
use crate::retry::RetryPolicy;

/// Worker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub database_url: String,
    /// Base URL of the Curio API (default: `http://localhost:3000`).
    pub api_url: String,
    /// Bearer token presented to the matching endpoint.
    pub api_token: String,
    /// Per-call timeout for the matching endpoint. Unset means no timeout.
    pub api_timeout: Option<Duration>,
    /// Fallback poll interval (default: 30s).
    pub poll_interval: Duration,
    /// How long a claimed job stays leased before another poll may take it.
    pub job_lease: Duration,
    pub processor: ProcessorConfig,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `DATABASE_URL`                | required                |
    /// | `MATCHING_API_URL`            | `http://localhost:3000` |
    /// | `MATCHING_API_TOKEN`          | required                |
    /// | `MATCHING_API_TIMEOUT_SECS`   | unset (no timeout)      |
    /// | `MATCH_POLL_INTERVAL_SECS`    | `30`                    |
    /// | `MATCH_BATCH_SIZE`            | `5`                     |
    /// | `MATCH_MAX_ATTEMPTS`          | `3`                     |
    /// | `MATCH_RETRY_BASE_DELAY_SECS` | `30`                    |
    /// | `MATCH_RETRY_MAX_DELAY_SECS`  | `900`                   |
    /// | `MATCH_JOB_LEASE_SECS`        | `300`                   |
    ///
    /// # Panics
    ///
    /// Panics when a required variable is missing or a value does not
    /// parse, so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let api_url = std::env::var("MATCHING_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());
        let api_token =
            std::env::var("MATCHING_API_TOKEN").expect("MATCHING_API_TOKEN must be set");

        let api_timeout = std::env::var("MATCHING_API_TIMEOUT_SECS")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| Duration::from_secs(parse_positive("MATCHING_API_TIMEOUT_SECS", &v)));

        let defaults = RetryPolicy::default();
        let retry = RetryPolicy {
            max_attempts: env_positive("MATCH_MAX_ATTEMPTS", defaults.max_attempts as u64) as i32,
            base_delay: secs("MATCH_RETRY_BASE_DELAY_SECS", defaults.base_delay.as_secs()),
            max_delay: secs("MATCH_RETRY_MAX_DELAY_SECS", defaults.max_delay.as_secs()),
        };
        assert!(
            retry.base_delay <= retry.max_delay,
            "MATCH_RETRY_BASE_DELAY_SECS must not exceed MATCH_RETRY_MAX_DELAY_SECS"
        );

        Self {
            database_url,
            api_url,
            api_token,
            api_timeout,
            poll_interval: secs("MATCH_POLL_INTERVAL_SECS", 30),
            job_lease: secs("MATCH_JOB_LEASE_SECS", 300),
            processor: ProcessorConfig {
                batch_size: env_positive("MATCH_BATCH_SIZE", DEFAULT_BATCH_SIZE as u64) as i64,
                retry,
            },
        }
    }
}

fn secs(name: &str, default: u64) -> Duration {
    Duration::from_secs(env_positive(name, default))
}

fn env_positive(name: &str, default: u64) -> u64 {
    match std::env::var(name) {
        Ok(raw) => parse_positive(name, &raw),
        Err(_) => default,
    }
}

fn parse_positive(name: &str, raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 && value <= i32::MAX as u64 => value,
        _ => panic!("{name} must be a positive integer, got '{raw}'"),
    }
}
