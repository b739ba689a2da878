pub mod match_jobs;
pub mod matching;
pub mod notifications;
pub mod wishlist_matches;
