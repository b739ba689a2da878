//! Repository for the `user_notifications` table.

use curio_core::types::DbId;
use sqlx::PgPool;

use crate::models::notification::{CreateNotification, NotificationQuery, UserNotification};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list for `user_notifications` queries.
const COLUMNS: &str = "\
    id, user_id, notification_type, related_id, title, message, is_read, read_at, created_at";

/// Provides CRUD operations for user notifications.
pub struct UserNotificationRepo;

impl UserNotificationRepo {
    /// Whether a notification of `notification_type` about `related_id`
    /// already exists for the user.
    pub async fn exists_for_related(
        pool: &PgPool,
        user_id: DbId,
        notification_type: &str,
        related_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                 SELECT 1 FROM user_notifications \
                 WHERE user_id = $1 AND notification_type = $2 AND related_id = $3 \
             )",
        )
        .bind(user_id)
        .bind(notification_type)
        .bind(related_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a notification, returning its ID.
    ///
    /// Returns `None` when an identical `(user_id, notification_type,
    /// related_id)` notification was inserted concurrently.
    pub async fn create(
        pool: &PgPool,
        input: &CreateNotification,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO user_notifications \
                 (user_id, notification_type, related_id, title, message) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (user_id, notification_type, related_id) \
                 WHERE related_id IS NOT NULL DO NOTHING \
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.notification_type)
        .bind(input.related_id)
        .bind(&input.title)
        .bind(&input.message)
        .fetch_optional(pool)
        .await
    }

    /// List a user's notifications, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &NotificationQuery,
    ) -> Result<Vec<UserNotification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_notifications \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, UserNotification>(&query)
            .bind(user_id)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }
}
