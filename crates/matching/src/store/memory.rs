//! In-memory [`MatchStore`] for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use curio_core::types::DbId;
use curio_db::models::marketplace_listing::MarketplaceListing;
use curio_db::models::notification::CreateNotification;
use curio_db::models::status::{ListingStatus, WishlistItemStatus, WishlistMatchStatus};
use curio_db::models::wishlist_item::WishlistItem;
use curio_db::models::wishlist_match::UpsertWishlistMatch;

use super::MatchStore;

#[derive(Debug, Clone)]
pub struct StoredMatch {
    pub id: DbId,
    pub values: UpsertWishlistMatch,
    pub status: WishlistMatchStatus,
}

#[derive(Default)]
struct State {
    next_id: DbId,
    wishlist_items: Vec<WishlistItem>,
    listings: Vec<MarketplaceListing>,
    matches: Vec<StoredMatch>,
    notifications: Vec<(DbId, CreateNotification)>,
    failing_pairs: HashSet<(DbId, DbId)>,
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn add_wishlist_item(
        &self,
        user_id: DbId,
        item_name: &str,
        category: Option<&str>,
        manufacturer: Option<&str>,
    ) -> DbId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        state.wishlist_items.push(WishlistItem {
            id,
            user_id,
            item_name: item_name.to_string(),
            category: category.map(str::to_string),
            manufacturer: manufacturer.map(str::to_string),
            pattern: None,
            description: None,
            desired_price_max: None,
            status: WishlistItemStatus::Active,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_listing(
        &self,
        user_id: DbId,
        title: &str,
        category: Option<&str>,
        description: Option<&str>,
    ) -> DbId {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let now = Utc::now();
        state.listings.push(MarketplaceListing {
            id,
            user_id,
            title: title.to_string(),
            description: description.map(str::to_string),
            category: category.map(str::to_string),
            subcategory: None,
            asking_price: None,
            listing_status: ListingStatus::Active,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn set_wishlist_status(&self, id: DbId, status: WishlistItemStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(item) = state.wishlist_items.iter_mut().find(|w| w.id == id) {
            item.status = status;
        }
    }

    pub fn set_listing_status(&self, id: DbId, status: ListingStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(listing) = state.listings.iter_mut().find(|l| l.id == id) {
            listing.listing_status = status;
        }
    }

    pub fn set_match_status(&self, id: DbId, status: WishlistMatchStatus) {
        let mut state = self.state.lock().unwrap();
        if let Some(stored) = state.matches.iter_mut().find(|m| m.id == id) {
            stored.status = status;
        }
    }

    /// Make every upsert of this pair fail.
    pub fn fail_upserts_for(&self, wishlist_item_id: DbId, marketplace_listing_id: DbId) {
        let mut state = self.state.lock().unwrap();
        state
            .failing_pairs
            .insert((wishlist_item_id, marketplace_listing_id));
    }

    pub fn matches(&self) -> Vec<StoredMatch> {
        self.state.lock().unwrap().matches.clone()
    }

    pub fn notifications(&self) -> Vec<CreateNotification> {
        self.state
            .lock()
            .unwrap()
            .notifications
            .iter()
            .map(|(_, n)| n.clone())
            .collect()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn find_active_listing(
        &self,
        id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .iter()
            .find(|l| l.id == id && l.is_active())
            .cloned())
    }

    async fn find_wishlist_item(&self, id: DbId) -> Result<Option<WishlistItem>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state.wishlist_items.iter().find(|w| w.id == id).cloned())
    }

    async fn active_wishlist_items_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<WishlistItem>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .wishlist_items
            .iter()
            .filter(|w| w.is_active() && w.user_id != owner_id)
            .cloned()
            .collect())
    }

    async fn active_listings_excluding_owner(
        &self,
        owner_id: DbId,
    ) -> Result<Vec<MarketplaceListing>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .listings
            .iter()
            .filter(|l| l.is_active() && l.user_id != owner_id)
            .cloned()
            .collect())
    }

    async fn upsert_match(&self, input: &UpsertWishlistMatch) -> Result<DbId, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let pair = (input.wishlist_item_id, input.marketplace_listing_id);
        if state.failing_pairs.contains(&pair) {
            return Err(sqlx::Error::Protocol("injected upsert failure".into()));
        }

        if let Some(existing) = state.matches.iter_mut().find(|m| {
            (m.values.wishlist_item_id, m.values.marketplace_listing_id) == pair
        }) {
            existing.values = *input;
            existing.status = WishlistMatchStatus::New;
            return Ok(existing.id);
        }

        let id = state.next_id();
        state.matches.push(StoredMatch {
            id,
            values: *input,
            status: WishlistMatchStatus::New,
        });
        Ok(id)
    }

    async fn has_notification(
        &self,
        user_id: DbId,
        notification_type: &str,
        related_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state.notifications.iter().any(|(_, n)| {
            n.user_id == user_id
                && n.notification_type == notification_type
                && n.related_id == Some(related_id)
        }))
    }

    async fn create_notification(
        &self,
        input: &CreateNotification,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let duplicate = state.notifications.iter().any(|(_, n)| {
            n.user_id == input.user_id
                && n.notification_type == input.notification_type
                && n.related_id == input.related_id
        });
        if duplicate {
            return Ok(None);
        }
        let id = state.next_id();
        state.notifications.push((id, input.clone()));
        Ok(Some(id))
    }
}
