//! Data access seam for the matcher.

use async_trait::async_trait;
use curio_core::types::DbId;
use curio_db::models::marketplace_listing::MarketplaceListing;
use curio_db::models::notification::CreateNotification;
use curio_db::models::wishlist_item::WishlistItem;
use curio_db::models::wishlist_match::UpsertWishlistMatch;

mod postgres;

#[cfg(test)]
pub(crate) mod memory;

pub use postgres::PgMatchStore;

/// Everything the matcher reads and writes.
///
/// Candidate queries must only return `active` rows and must exclude rows
/// owned by `owner_id`.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// An active listing, or `None` if it is missing or not active.
    async fn find_active_listing(&self, id: DbId)
        -> Result<Option<MarketplaceListing>, sqlx::Error>;

    /// A wishlist item in any status.
    async fn find_wishlist_item(&self, id: DbId) -> Result<Option<WishlistItem>, sqlx::Error>;

    async fn active_wishlist_items_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<WishlistItem>, sqlx::Error>;

    async fn active_listings_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<MarketplaceListing>, sqlx::Error>;

    /// Insert or refresh a match, resetting its status to `new`. Returns the match ID.
    async fn upsert_match(&self, input: &UpsertWishlistMatch) -> Result<DbId, sqlx::Error>;

    async fn has_notification(
        &self,
        user_id: DbId,
        notification_type: &str,
        related_id: DbId,
    ) -> Result<bool, sqlx::Error>;

    /// Insert a notification. `None` means an identical one already existed.
    async fn create_notification(
        &self,
        input: &CreateNotification,
    ) -> Result<Option<DbId>, sqlx::Error>;
}
