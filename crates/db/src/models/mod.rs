//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where rows are created here

pub mod marketplace_listing;
pub mod match_job;
pub mod notification;
pub mod status;
pub mod wishlist_item;
pub mod wishlist_match;
