pub mod health;
pub mod match_jobs;
pub mod matching;
pub mod notifications;
pub mod wishlist_matches;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /matching/run                          run a matching pass (POST)
///
/// /notifications                         caller's notifications (GET)
///
/// /wishlist-matches                      caller's matches (GET)
/// /wishlist-matches/{id}                 single match (GET)
/// /wishlist-matches/{id}/status          change match status (PUT)
///
/// /match-jobs/{id}                       job inspection (GET)
/// /match-jobs/{id}/retry                 manual retry (POST)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/matching", matching::router())
        .nest("/notifications", notifications::router())
        .nest("/wishlist-matches", wishlist_matches::router())
        .nest("/match-jobs", match_jobs::router())
}
