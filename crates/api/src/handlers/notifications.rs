//! Handlers for the `/notifications` resource.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use curio_db::models::notification::NotificationQuery;
use curio_db::repositories::UserNotificationRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications?limit=&offset=
///
/// The caller's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<NotificationQuery>,
) -> AppResult<impl IntoResponse> {
    let notifications =
        UserNotificationRepo::list_for_user(&state.pool, user.user_id, &params).await?;
    Ok(Json(DataResponse {
        data: notifications,
    }))
}
