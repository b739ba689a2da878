//! User notification entity model and DTOs.

use curio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Notification type written for wishlist matches.
pub const NOTIFICATION_TYPE_WISHLIST_MATCH: &str = "wishlist_match";

/// A row from the `user_notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserNotification {
    pub id: DbId,
    pub user_id: DbId,
    pub notification_type: String,
    pub related_id: Option<DbId>,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Query parameters for listing a user's notifications.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// DTO for inserting a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub notification_type: String,
    pub related_id: Option<DbId>,
    pub title: String,
    pub message: String,
}
