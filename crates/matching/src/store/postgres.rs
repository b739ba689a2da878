use async_trait::async_trait;
use curio_core::types::DbId;
use curio_db::models::marketplace_listing::MarketplaceListing;
use curio_db::models::notification::CreateNotification;
use curio_db::models::wishlist_item::WishlistItem;
use curio_db::models::wishlist_match::UpsertWishlistMatch;
use curio_db::repositories::{
    MarketplaceListingRepo, UserNotificationRepo, WishlistItemRepo, WishlistMatchRepo,
};
use sqlx::PgPool;

use super::MatchStore;

/// [`MatchStore`] backed by the Postgres repositories.
#[derive(Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn find_active_listing(
        &self,
        id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        MarketplaceListingRepo::find_active_by_id(&self.pool, id).await
    }

    async fn find_wishlist_item(&self, id: DbId) -> Result<Option<WishlistItem>, sqlx::Error> {
        WishlistItemRepo::find_by_id(&self.pool, id).await
    }

    async fn active_wishlist_items_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        WishlistItemRepo::list_active_excluding_owner(&self.pool, owner_id).await
    }

    async fn active_listings_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<MarketplaceListing>, sqlx::Error> {
        MarketplaceListingRepo::list_active_excluding_owner(&self.pool, owner_id).await
    }

    async fn upsert_match(&self, input: &UpsertWishlistMatch) -> Result<DbId, sqlx::Error> {
        WishlistMatchRepo::upsert(&self.pool, input).await
    }

    async fn has_notification(
        &self,
        user_id: DbId,
        notification_type: &str,
        related_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        UserNotificationRepo::exists_for_related(&self.pool, user_id, notification_type, related_id)
            .await
    }

    async fn create_notification(
        &self,
        input: &CreateNotification,
    ) -> Result<Option<DbId>, sqlx::Error> {
        UserNotificationRepo::create(&self.pool, input).await
    }
}
