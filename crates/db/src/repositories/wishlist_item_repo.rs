//! Repository for the `wishlist_items` table.

use curio_core::types::DbId;
use sqlx::PgPool;

use crate::models::status::WishlistItemStatus;
use crate::models::wishlist_item::{CreateWishlistItem, WishlistItem};

/// Column list for `wishlist_items` queries.
const COLUMNS: &str = "\
    id, user_id, item_name, category, manufacturer, pattern, description, \
    desired_price_max, status, created_at, updated_at";

/// Provides CRUD operations for wishlist items.
pub struct WishlistItemRepo;

impl WishlistItemRepo {
    /// Insert a wishlist item. Status defaults to `active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWishlistItem,
    ) -> Result<WishlistItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO wishlist_items \
                 (user_id, item_name, category, manufacturer, pattern, description, \
                  desired_price_max, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(input.user_id)
            .bind(&input.item_name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.pattern)
            .bind(&input.description)
            .bind(input.desired_price_max)
            .bind(input.status.unwrap_or(WishlistItemStatus::Active))
            .fetch_one(pool)
            .await
    }

    /// Find a wishlist item by its ID, regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WishlistItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishlist_items WHERE id = $1");
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All active wishlist items not owned by `owner_id`, oldest first.
    pub async fn list_active_excluding_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wishlist_items \
             WHERE status = $1 AND user_id <> $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, WishlistItem>(&query)
            .bind(WishlistItemStatus::Active)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
