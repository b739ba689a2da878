use curio_core::error::CoreError;

/// Errors returned by [`MatchingService`](crate::MatchingService).
///
/// Only failures that abort a whole pass surface here. Per-candidate
/// persistence failures are logged and counted instead.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    /// A domain error, typically a missing or inactive source row.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Loading the source row or its candidates failed.
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),
}
