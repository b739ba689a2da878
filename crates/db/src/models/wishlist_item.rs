//! Wishlist item entity model and DTOs.

use curio_core::scoring::WishlistCriteria;
use curio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::WishlistItemStatus;

/// A row from the `wishlist_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WishlistItem {
    pub id: DbId,
    pub user_id: DbId,
    pub item_name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub pattern: Option<String>,
    pub description: Option<String>,
    pub desired_price_max: Option<f64>,
    pub status: WishlistItemStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl WishlistItem {
    /// The fields used by the match scorer.
    pub fn criteria(&self) -> WishlistCriteria<'_> {
        WishlistCriteria {
            item_name: &self.item_name,
            category: self.category.as_deref(),
            manufacturer: self.manufacturer.as_deref(),
            pattern: self.pattern.as_deref(),
            description: self.description.as_deref(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == WishlistItemStatus::Active
    }
}

/// DTO for inserting a wishlist item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWishlistItem {
    pub user_id: DbId,
    pub item_name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub pattern: Option<String>,
    pub description: Option<String>,
    pub desired_price_max: Option<f64>,
    /// Defaults to `active` when omitted.
    pub status: Option<WishlistItemStatus>,
}
