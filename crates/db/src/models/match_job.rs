//! Match job entity model and DTOs.

use curio_core::request::MatchRequest;
use curio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::{MatchJobStatus, MatchJobType};

/// A row from the `match_jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MatchJob {
    pub id: DbId,
    pub job_type: MatchJobType,
    pub reference_id: DbId,
    pub status: MatchJobStatus,
    pub attempts: i32,
    pub error_message: Option<String>,
    pub claimed_at: Option<Timestamp>,
    pub next_attempt_at: Option<Timestamp>,
    pub processed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MatchJob {
    /// The orchestrator request this job stands for.
    pub fn request(&self) -> MatchRequest {
        match self.job_type {
            MatchJobType::MatchListing => MatchRequest::MatchListing {
                marketplace_listing_id: self.reference_id,
            },
            MatchJobType::MatchWishlist => MatchRequest::MatchWishlist {
                wishlist_item_id: self.reference_id,
            },
        }
    }
}

/// DTO for queueing a job.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EnqueueMatchJob {
    pub job_type: MatchJobType,
    pub reference_id: DbId,
}
