//! Wishlist match entity model and DTOs.

use curio_core::scoring::MatchDetails;
use curio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::status::WishlistMatchStatus;

/// A row from the `wishlist_matches` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistMatch {
    pub id: DbId,
    pub wishlist_item_id: DbId,
    pub marketplace_listing_id: DbId,
    pub match_score: i32,
    pub match_details: Json<MatchDetails>,
    pub match_status: WishlistMatchStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Values written by a matching pass for one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertWishlistMatch {
    pub wishlist_item_id: DbId,
    pub marketplace_listing_id: DbId,
    pub match_score: i32,
    pub match_details: MatchDetails,
}

/// Query parameters for listing a user's matches.
#[derive(Debug, Default, Deserialize)]
pub struct WishlistMatchQuery {
    /// Only return matches in this status. Dismissed matches are hidden otherwise.
    pub status: Option<WishlistMatchStatus>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// DTO for `PUT /wishlist-matches/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateMatchStatus {
    pub status: WishlistMatchStatus,
}
