//! Route definitions for match jobs.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::match_jobs;
use crate::state::AppState;

/// Routes mounted at `/match-jobs`.
///
/// ```text
/// GET    /{id}          -> get_by_id
/// POST   /{id}/retry    -> retry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(match_jobs::get_by_id))
        .route("/{id}/retry", post(match_jobs::retry))
}
