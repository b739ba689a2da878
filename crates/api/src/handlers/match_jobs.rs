//! Handlers for the `/match-jobs` resource.
//!
//! Queue administration is limited to service tokens.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use curio_core::error::CoreError;
use curio_core::types::DbId;
use curio_db::repositories::MatchJobRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::ServiceCaller;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/match-jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _caller: ServiceCaller,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = MatchJobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MatchJob",
            id,
        }))?;
    Ok(Json(DataResponse { data: job }))
}

/// POST /api/v1/match-jobs/{id}/retry
///
/// Move a `failed` or `dead` job back to `pending` with its attempt count
/// reset. Any other status is a 409.
pub async fn retry(
    State(state): State<AppState>,
    ServiceCaller(caller): ServiceCaller,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let job = MatchJobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MatchJob",
            id,
        }))?;

    if !job.status.is_retryable() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Match job {id} is {} and cannot be retried",
            job.status
        ))));
    }

    // The status may have changed since the read above.
    let requeued = MatchJobRepo::requeue(&state.pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Match job {id} changed status and cannot be retried"
        )))
    })?;

    tracing::info!(
        caller_id = caller.user_id,
        job_id = id,
        previous_status = %job.status,
        "Match job requeued"
    );
    Ok(Json(DataResponse { data: requeued }))
}
