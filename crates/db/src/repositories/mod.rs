//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod marketplace_listing_repo;
pub mod match_job_repo;
pub mod user_notification_repo;
pub mod wishlist_item_repo;
pub mod wishlist_match_repo;

pub use marketplace_listing_repo::MarketplaceListingRepo;
pub use match_job_repo::{ClaimOptions, MatchJobRepo};
pub use user_notification_repo::UserNotificationRepo;
pub use wishlist_item_repo::WishlistItemRepo;
pub use wishlist_match_repo::WishlistMatchRepo;

/// Maximum page size for list queries.
pub const MAX_LIMIT: i64 = 100;

/// Default page size for list queries.
pub const DEFAULT_LIMIT: i64 = 50;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
