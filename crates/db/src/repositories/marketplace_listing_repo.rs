//! Repository for the `marketplace_listings` table.
//!
//! Listings are soft-deleted by moving `listing_status` to `deleted`;
//! only `active` listings are visible to matching.

use curio_core::types::DbId;
use sqlx::PgPool;

use crate::models::marketplace_listing::{CreateMarketplaceListing, MarketplaceListing};
use crate::models::status::ListingStatus;

/// Column list for `marketplace_listings` queries.
const COLUMNS: &str = "\
    id, user_id, title, description, category, subcategory, asking_price, \
    listing_status, created_at, updated_at";

/// Provides CRUD operations for marketplace listings.
pub struct MarketplaceListingRepo;

impl MarketplaceListingRepo {
    /// Insert a listing. Status defaults to `active`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMarketplaceListing,
    ) -> Result<MarketplaceListing, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketplace_listings \
                 (user_id, title, description, category, subcategory, asking_price, listing_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(input.asking_price)
            .bind(input.listing_status.unwrap_or(ListingStatus::Active))
            .fetch_one(pool)
            .await
    }

    /// Find an active listing by its ID.
    pub async fn find_active_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_listings \
             WHERE id = $1 AND listing_status = $2"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(id)
            .bind(ListingStatus::Active)
            .fetch_optional(pool)
            .await
    }

    /// All active listings not owned by `owner_id`, oldest first.
    pub async fn list_active_excluding_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_listings \
             WHERE listing_status = $1 AND user_id <> $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(ListingStatus::Active)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
