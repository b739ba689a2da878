//! Marketplace listing entity model and DTOs.

use curio_core::scoring::ListingText;
use curio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ListingStatus;

/// A row from the `marketplace_listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketplaceListing {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub asking_price: Option<f64>,
    pub listing_status: ListingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MarketplaceListing {
    /// The fields used by the match scorer.
    pub fn text(&self) -> ListingText<'_> {
        ListingText {
            title: &self.title,
            category: self.category.as_deref(),
            description: self.description.as_deref(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.listing_status == ListingStatus::Active
    }
}

/// DTO for inserting a listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMarketplaceListing {
    pub user_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub asking_price: Option<f64>,
    /// Defaults to `active` when omitted.
    pub listing_status: Option<ListingStatus>,
}
