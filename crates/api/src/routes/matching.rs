//! Route definitions for the matching orchestrator.

use axum::routing::post;
use axum::Router;

use crate::handlers::matching;
use crate::state::AppState;

/// Routes mounted at `/matching`.
///
/// ```text
/// POST   /run    -> run
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/run", post(matching::run))
}
