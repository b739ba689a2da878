//! Match persistence and owner notification.
//!
//! A qualifying pair is upserted on `(wishlist_item_id,
//! marketplace_listing_id)`, then the wishlist item's owner is notified
//! unless a notification about that match already exists. Re-running a
//! pass therefore never duplicates either row.

use curio_core::scoring::MatchScore;
use curio_core::types::DbId;
use curio_db::models::notification::{CreateNotification, NOTIFICATION_TYPE_WISHLIST_MATCH};
use curio_db::models::wishlist_item::WishlistItem;
use curio_db::models::wishlist_match::UpsertWishlistMatch;

use crate::store::MatchStore;

/// Title of every wishlist match notification.
pub const MATCH_NOTIFICATION_TITLE: &str = "Wishlist match";

/// Outcome of persisting one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedMatch {
    pub match_id: DbId,
    /// Whether this call created the owner's notification.
    pub notified: bool,
}

/// Human-readable notification body for a match.
pub fn match_notification_message(score: i32, item_name: &str) -> String {
    format!("New match found! {score}% match for \"{item_name}\"")
}

/// Upsert the match for `wish` and `listing_id`, then notify the wish's owner once.
pub async fn persist_match<S>(
    store: &S,
    wish: &WishlistItem,
    listing_id: DbId,
    score: &MatchScore,
) -> Result<PersistedMatch, sqlx::Error>
where
    S: MatchStore + ?Sized,
{
    let match_id = store
        .upsert_match(&UpsertWishlistMatch {
            wishlist_item_id: wish.id,
            marketplace_listing_id: listing_id,
            match_score: score.score,
            match_details: score.details,
        })
        .await?;

    let already_notified = store
        .has_notification(wish.user_id, NOTIFICATION_TYPE_WISHLIST_MATCH, match_id)
        .await?;
    if already_notified {
        return Ok(PersistedMatch {
            match_id,
            notified: false,
        });
    }

    let created = store
        .create_notification(&CreateNotification {
            user_id: wish.user_id,
            notification_type: NOTIFICATION_TYPE_WISHLIST_MATCH.to_string(),
            related_id: Some(match_id),
            title: MATCH_NOTIFICATION_TITLE.to_string(),
            message: match_notification_message(score.score, &wish.item_name),
        })
        .await?;

    if let Some(notification_id) = created {
        tracing::debug!(
            match_id,
            notification_id,
            user_id = wish.user_id,
            "Wishlist match notification created"
        );
    }

    Ok(PersistedMatch {
        match_id,
        notified: created.is_some(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use curio_core::scoring::MatchDetails;

    fn score(value: i32) -> MatchScore {
        MatchScore {
            score: value,
            details: MatchDetails {
                name_score: value,
                ..Default::default()
            },
        }
    }

    async fn wishlist_item(store: &MemoryStore, owner: DbId) -> WishlistItem {
        let id = store.add_wishlist_item(owner, "Jadeite Bowl", Some("Glassware"), None);
        store.find_wishlist_item(id).await.unwrap().unwrap()
    }

    #[test]
    fn message_embeds_score_and_item_name() {
        assert_eq!(
            match_notification_message(86, "Jadeite Bowl"),
            "New match found! 86% match for \"Jadeite Bowl\""
        );
    }

    #[tokio::test]
    async fn first_persist_notifies_owner() {
        let store = MemoryStore::default();
        let wish = wishlist_item(&store, 1).await;

        let persisted = persist_match(&store, &wish, 99, &score(85)).await.unwrap();

        assert!(persisted.notified);
        let notifications = store.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, 1);
        assert_eq!(notifications[0].related_id, Some(persisted.match_id));
        assert_eq!(notifications[0].title, MATCH_NOTIFICATION_TITLE);
        assert_eq!(
            notifications[0].notification_type,
            NOTIFICATION_TYPE_WISHLIST_MATCH
        );
    }

    #[tokio::test]
    async fn repeated_persist_updates_without_renotifying() {
        let store = MemoryStore::default();
        let wish = wishlist_item(&store, 1).await;

        let first = persist_match(&store, &wish, 99, &score(85)).await.unwrap();
        let second = persist_match(&store, &wish, 99, &score(91)).await.unwrap();

        assert_eq!(first.match_id, second.match_id);
        assert!(!second.notified);
        assert_eq!(store.notifications().len(), 1);

        let matches = store.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].values.match_score, 91);
    }

    #[tokio::test]
    async fn upsert_failure_is_returned() {
        let store = MemoryStore::default();
        let wish = wishlist_item(&store, 1).await;
        store.fail_upserts_for(wish.id, 99);

        let result = persist_match(&store, &wish, 99, &score(85)).await;

        assert!(result.is_err());
        assert!(store.notifications().is_empty());
    }
}
