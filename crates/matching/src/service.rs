//! Matching orchestrator.
//!
//! Two entry points, one per [`MatchRequest`] variant. Each loads its
//! source row, scores it against every active counterpart not owned by the
//! same user, and persists pairs that reach
//! [`MATCH_THRESHOLD`](curio_core::scoring::MATCH_THRESHOLD). Candidates are
//! processed sequentially; a failure persisting one candidate is logged and
//! the pass continues. Matches that stop qualifying are left in place.

use curio_core::error::CoreError;
use curio_core::request::MatchRequest;
use curio_core::scoring::{score_match, MatchDetails, MatchScore};
use curio_core::types::DbId;
use curio_db::models::wishlist_item::WishlistItem;
use serde::Serialize;

use crate::error::MatchingError;
use crate::persistence::persist_match;
use crate::store::MatchStore;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The other side of a persisted match, keyed the way the wire response
/// names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Counterpart {
    #[serde(rename = "wishlistItemId")]
    WishlistItem(DbId),
    #[serde(rename = "marketplaceListingId")]
    Listing(DbId),
}

/// One match created or refreshed by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedCandidate {
    #[serde(flatten)]
    pub counterpart: Counterpart,
    pub match_id: DbId,
    pub score: i32,
    pub details: MatchDetails,
}

/// Result of a matching pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub success: bool,
    pub matches_created: usize,
    pub matches: Vec<MatchedCandidate>,
    /// Qualifying candidates whose persistence failed.
    #[serde(skip)]
    pub failures: usize,
}

impl MatchSummary {
    fn new() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    fn push(&mut self, candidate: MatchedCandidate) {
        self.matches.push(candidate);
        self.matches_created = self.matches.len();
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Runs matching passes against a [`MatchStore`].
pub struct MatchingService<S> {
    store: S,
}

impl<S: MatchStore> MatchingService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Dispatch a validated request to its entry point.
    pub async fn run(&self, request: MatchRequest) -> Result<MatchSummary, MatchingError> {
        match request {
            MatchRequest::MatchListing {
                marketplace_listing_id,
            } => self.match_listing(marketplace_listing_id).await,
            MatchRequest::MatchWishlist { wishlist_item_id } => {
                self.match_wishlist(wishlist_item_id).await
            }
        }
    }

    /// Match one active listing against every eligible wishlist item.
    ///
    /// Each match notifies the owner of the wishlist item involved, so a
    /// single pass may notify several users.
    pub async fn match_listing(&self, listing_id: DbId) -> Result<MatchSummary, MatchingError> {
        let listing = self
            .store
            .find_active_listing(listing_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "MarketplaceListing",
                id: listing_id,
            })?;

        let candidates = self
            .store
            .active_wishlist_items_excluding_owner(listing.user_id)
            .await?;
        tracing::debug!(
            listing_id,
            candidates = candidates.len(),
            "Matching listing against wishlist items"
        );

        let mut summary = MatchSummary::new();
        for wish in &candidates {
            let score = score_match(&wish.criteria(), &listing.text());
            self.record(
                &mut summary,
                wish,
                listing.id,
                score,
                Counterpart::WishlistItem(wish.id),
            )
            .await;
        }

        log_summary("match_listing", listing_id, &summary);
        Ok(summary)
    }

    /// Match one active wishlist item against every eligible listing.
    ///
    /// A wishlist item that exists but is no longer active is treated as
    /// not found.
    pub async fn match_wishlist(
        &self,
        wishlist_item_id: DbId,
    ) -> Result<MatchSummary, MatchingError> {
        let wish = self
            .store
            .find_wishlist_item(wishlist_item_id)
            .await?
            .filter(WishlistItem::is_active)
            .ok_or(CoreError::NotFound {
                entity: "WishlistItem",
                id: wishlist_item_id,
            })?;

        let candidates = self
            .store
            .active_listings_excluding_owner(wish.user_id)
            .await?;
        tracing::debug!(
            wishlist_item_id,
            candidates = candidates.len(),
            "Matching wishlist item against listings"
        );

        let criteria = wish.criteria();
        let mut summary = MatchSummary::new();
        for listing in &candidates {
            let score = score_match(&criteria, &listing.text());
            self.record(
                &mut summary,
                &wish,
                listing.id,
                score,
                Counterpart::Listing(listing.id),
            )
            .await;
        }

        log_summary("match_wishlist", wishlist_item_id, &summary);
        Ok(summary)
    }

    /// Persist a qualifying score and add it to the summary. Below-threshold
    /// scores are ignored; persistence failures are logged and counted.
    async fn record(
        &self,
        summary: &mut MatchSummary,
        wish: &WishlistItem,
        listing_id: DbId,
        score: MatchScore,
        counterpart: Counterpart,
    ) {
        if !score.qualifies() {
            return;
        }

        match persist_match(&self.store, wish, listing_id, &score).await {
            Ok(persisted) => summary.push(MatchedCandidate {
                counterpart,
                match_id: persisted.match_id,
                score: score.score,
                details: score.details,
            }),
            Err(e) => {
                summary.failures += 1;
                tracing::warn!(
                    wishlist_item_id = wish.id,
                    listing_id,
                    score = score.score,
                    error = %e,
                    "Failed to persist wishlist match",
                );
            }
        }
    }
}

fn log_summary(mode: &'static str, reference_id: DbId, summary: &MatchSummary) {
    tracing::info!(
        mode,
        reference_id,
        matches_created = summary.matches_created,
        failures = summary.failures,
        "Matching pass finished"
    );
}
