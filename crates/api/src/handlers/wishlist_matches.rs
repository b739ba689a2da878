//! Handlers for the `/wishlist-matches` resource.
//!
//! Users only ever see and change matches on their own wishlist items.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use curio_core::error::CoreError;
use curio_core::types::DbId;
use curio_db::models::wishlist_match::{UpdateMatchStatus, WishlistMatchQuery};
use curio_db::repositories::WishlistMatchRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/wishlist-matches?status=&limit=&offset=
///
/// List the caller's matches, best score first. Dismissed matches are
/// omitted unless `status=dismissed` is requested.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<WishlistMatchQuery>,
) -> AppResult<impl IntoResponse> {
    let matches = WishlistMatchRepo::list_for_user(&state.pool, user.user_id, &params).await?;
    Ok(Json(DataResponse { data: matches }))
}

/// GET /api/v1/wishlist-matches/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_owner(&state, &user, id).await?;
    let found = WishlistMatchRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WishlistMatch",
            id,
        }))?;
    Ok(Json(DataResponse { data: found }))
}

/// PUT /api/v1/wishlist-matches/{id}/status
///
/// Set a match to `viewed`, `dismissed` or `interested`. Only the matcher
/// sets `new`.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMatchStatus>,
) -> AppResult<impl IntoResponse> {
    if !input.status.is_user_settable() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Match status cannot be set to '{}'",
            input.status
        ))));
    }

    ensure_owner(&state, &user, id).await?;

    let updated = WishlistMatchRepo::set_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WishlistMatch",
            id,
        }))?;

    tracing::info!(
        user_id = user.user_id,
        match_id = id,
        status = %input.status,
        "Wishlist match status updated"
    );
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 if the match does not exist, 403 if it belongs to someone else.
async fn ensure_owner(state: &AppState, user: &AuthUser, match_id: DbId) -> AppResult<()> {
    let owner = WishlistMatchRepo::find_owner(&state.pool, match_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "WishlistMatch",
            id: match_id,
        }))?;

    if owner != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this wishlist match".into(),
        )));
    }
    Ok(())
}
