//! Wishlist-to-listing matching.
//!
//! [`MatchingService`] loads one listing (or wishlist item), scores it
//! against every eligible counterpart, and persists qualifying pairs
//! through [`persistence::persist_match`]. All data access goes through
//! the [`MatchStore`] trait; [`PgMatchStore`] is the Postgres
//! implementation.

pub mod error;
pub mod persistence;
pub mod service;
pub mod store;

pub use error::MatchingError;
pub use service::{Counterpart, MatchSummary, MatchedCandidate, MatchingService};
pub use store::{MatchStore, PgMatchStore};
