//! Curio domain core.
//!
//! Pure matching logic shared by the database, API and worker crates:
//! free-text similarity, weighted wishlist-to-listing scoring, and the
//! orchestrator request type. Nothing in here performs I/O.

pub mod error;
pub mod request;
pub mod scoring;
pub mod similarity;
pub mod types;
