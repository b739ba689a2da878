//! Route definitions for wishlist matches.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::wishlist_matches;
use crate::state::AppState;

/// Routes mounted at `/wishlist-matches`.
///
/// ```text
/// GET    /               -> list
/// GET    /{id}           -> get_by_id
/// PUT    /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist_matches::list))
        .route("/{id}", get(wishlist_matches::get_by_id))
        .route("/{id}/status", put(wishlist_matches::update_status))
}
