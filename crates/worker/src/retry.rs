//! Bounded retry with exponential backoff.

use std::time::Duration;

use curio_core::types::Timestamp;

/// What to do with a job whose orchestrator call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAction {
    /// Mark `failed`; claimable again after the delay.
    Retry { after: Duration },
    /// Mark `dead`.
    Bury,
}

/// Retry limits for match jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first.
    pub max_attempts: i32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(30),
            max_delay: Duration::from_secs(15 * 60),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after attempt number `attempt` (1-based):
    /// `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
    pub fn backoff(&self, attempt: i32) -> Duration {
        let exponent = attempt.saturating_sub(1).clamp(0, 31) as u32;
        self.base_delay
            .saturating_mul(2u32.saturating_pow(exponent))
            .min(self.max_delay)
    }

    /// When a job that just failed attempt `attempt` becomes claimable again.
    pub fn retry_at(&self, now: Timestamp, attempt: i32) -> Timestamp {
        let millis = i64::try_from(self.backoff(attempt).as_millis()).unwrap_or(i64::MAX);
        now + chrono::Duration::milliseconds(millis)
    }

    /// Decide the fate of a job whose attempt number `attempt` failed.
    pub fn on_failure(&self, attempt: i32, retryable: bool) -> FailureAction {
        if retryable && attempt < self.max_attempts {
            FailureAction::Retry {
                after: self.backoff(attempt),
            }
        } else {
            FailureAction::Bury
        }
    }

    /// Whether a claimed job has already used up its attempts. This happens
    /// when a worker crashes mid-job and the lease expires repeatedly.
    pub fn is_exhausted(&self, attempts: i32) -> bool {
        attempts > self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_then_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(30));
        assert_eq!(policy.backoff(2), Duration::from_secs(60));
        assert_eq!(policy.backoff(3), Duration::from_secs(120));
        // 30 * 2^5 = 960 > 900
        assert_eq!(policy.backoff(6), Duration::from_secs(900));
        assert_eq!(policy.backoff(1_000), Duration::from_secs(900));
    }

    #[test]
    fn retryable_failures_retry_until_the_last_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.on_failure(1, true),
            FailureAction::Retry {
                after: Duration::from_secs(30)
            }
        );
        assert_eq!(
            policy.on_failure(2, true),
            FailureAction::Retry {
                after: Duration::from_secs(60)
            }
        );
        assert_eq!(policy.on_failure(3, true), FailureAction::Bury);
    }

    #[test]
    fn permanent_failures_are_buried_immediately() {
        assert_eq!(RetryPolicy::default().on_failure(1, false), FailureAction::Bury);
    }

    #[test]
    fn retry_at_adds_backoff() {
        let policy = RetryPolicy::default();
        let now = chrono::Utc::now();
        assert_eq!(policy.retry_at(now, 2), now + chrono::Duration::seconds(60));
    }

    #[test]
    fn exhaustion_is_strictly_beyond_max() {
        let policy = RetryPolicy::default();
        assert!(!policy.is_exhausted(3));
        assert!(policy.is_exhausted(4));
    }
}
