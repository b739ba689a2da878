//! Repository for the `wishlist_matches` table.
//!
//! Matches are keyed by `(wishlist_item_id, marketplace_listing_id)`. A
//! matching pass upserts on that pair, so re-running it never creates a
//! second row. Rows are never deleted by matching.

use curio_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::status::WishlistMatchStatus;
use crate::models::wishlist_match::{UpsertWishlistMatch, WishlistMatch, WishlistMatchQuery};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list for `wishlist_matches` queries.
const COLUMNS: &str = "\
    id, wishlist_item_id, marketplace_listing_id, match_score, match_details, \
    match_status, created_at, updated_at";

/// Same columns qualified with the `wm` alias for joined queries.
const QUALIFIED_COLUMNS: &str = "\
    wm.id, wm.wishlist_item_id, wm.marketplace_listing_id, wm.match_score, \
    wm.match_details, wm.match_status, wm.created_at, wm.updated_at";

/// Provides CRUD operations for wishlist matches.
pub struct WishlistMatchRepo;

impl WishlistMatchRepo {
    /// Insert or refresh the match for a pair, returning its ID.
    ///
    /// On conflict the score and details are overwritten and the status is
    /// reset to `new`, so a dismissed or viewed match resurfaces whenever it
    /// is recomputed above the threshold.
    pub async fn upsert(pool: &PgPool, input: &UpsertWishlistMatch) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO wishlist_matches \
                 (wishlist_item_id, marketplace_listing_id, match_score, match_details, match_status) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT ON CONSTRAINT uq_wishlist_matches_pair DO UPDATE \
             SET match_score = EXCLUDED.match_score, \
                 match_details = EXCLUDED.match_details, \
                 match_status = EXCLUDED.match_status \
             RETURNING id",
        )
        .bind(input.wishlist_item_id)
        .bind(input.marketplace_listing_id)
        .bind(input.match_score)
        .bind(Json(input.match_details))
        .bind(WishlistMatchStatus::New)
        .fetch_one(pool)
        .await
    }

    /// Find a match by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WishlistMatch>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM wishlist_matches WHERE id = $1");
        sqlx::query_as::<_, WishlistMatch>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }


    /// The user who owns the wishlist item behind a match, if the match exists.
    pub async fn find_owner(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT wi.user_id FROM wishlist_matches wm \
             JOIN wishlist_items wi ON wi.id = wm.wishlist_item_id \
             WHERE wm.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List matches for a user's wishlist items, best score first.
    ///
    /// Dismissed matches are hidden unless `params.status` asks for them.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        params: &WishlistMatchQuery,
    ) -> Result<Vec<WishlistMatch>, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        let offset = clamp_offset(params.offset);

        let (filter, status) = match params.status {
            Some(status) => ("wm.match_status = $2", status),
            None => ("wm.match_status <> $2", WishlistMatchStatus::Dismissed),
        };
        let query = format!(
            "SELECT {QUALIFIED_COLUMNS} FROM wishlist_matches wm \
             JOIN wishlist_items wi ON wi.id = wm.wishlist_item_id \
             WHERE wi.user_id = $1 AND {filter} \
             ORDER BY wm.match_score DESC, wm.updated_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, WishlistMatch>(&query)
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Set a match's status, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: WishlistMatchStatus,
    ) -> Result<Option<WishlistMatch>, sqlx::Error> {
        let query = format!(
            "UPDATE wishlist_matches SET match_status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WishlistMatch>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
