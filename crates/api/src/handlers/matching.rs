//! Handler for `POST /api/v1/matching/run`.
//!
//! Accepts `{ mode, marketplaceListingId?, wishlistItemId? }`, validates it
//! into a [`MatchRequest`] and runs one matching pass. The response body is
//! the pass summary without the `data` envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use curio_core::request::{MatchRequest, MatchRequestBody};
use curio_matching::MatchSummary;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/matching/run
///
/// Malformed JSON is reported as 400 rather than axum's default 422.
pub async fn run(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<MatchRequestBody>, JsonRejection>,
) -> AppResult<Json<MatchSummary>> {
    let Json(body) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let request = MatchRequest::try_from(body)?;

    tracing::info!(
        user_id = user.user_id,
        role = user.role.as_str(),
        mode = request.mode(),
        reference_id = request.reference_id(),
        "Matching pass requested"
    );

    let summary = state.matching.run(request).await?;
    Ok(Json(summary))
}
