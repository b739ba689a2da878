//! Orchestrator invocation request.
//!
//! On the wire the request is a flat object with a `mode` tag and two
//! optional id fields. [`MatchRequestBody`] mirrors that shape and
//! [`MatchRequest`] is the validated form with one variant per mode.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

pub const MODE_MATCH_LISTING: &str = "match_listing";
pub const MODE_MATCH_WISHLIST: &str = "match_wishlist";
pub const VALID_MODES: &[&str] = &[MODE_MATCH_LISTING, MODE_MATCH_WISHLIST];

/// Raw request body as sent by clients and the job worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequestBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketplace_listing_id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wishlist_item_id: Option<DbId>,
}

/// A validated matching request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRequest {
    /// Match one listing against every eligible wishlist item.
    MatchListing { marketplace_listing_id: DbId },
    /// Match one wishlist item against every eligible listing.
    MatchWishlist { wishlist_item_id: DbId },
}

impl MatchRequest {
    /// The mode tag of this request.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::MatchListing { .. } => MODE_MATCH_LISTING,
            Self::MatchWishlist { .. } => MODE_MATCH_WISHLIST,
        }
    }

    /// The id of the listing or wishlist item being matched.
    pub fn reference_id(&self) -> DbId {
        match *self {
            Self::MatchListing {
                marketplace_listing_id,
            } => marketplace_listing_id,
            Self::MatchWishlist { wishlist_item_id } => wishlist_item_id,
        }
    }
}

impl TryFrom<MatchRequestBody> for MatchRequest {
    type Error = CoreError;

    fn try_from(body: MatchRequestBody) -> Result<Self, Self::Error> {
        let mode = body
            .mode
            .as_deref()
            .ok_or_else(|| CoreError::Validation("Missing required field 'mode'".into()))?;

        match (mode, body.marketplace_listing_id, body.wishlist_item_id) {
            (MODE_MATCH_LISTING, Some(marketplace_listing_id), None) => Ok(Self::MatchListing {
                marketplace_listing_id,
            }),
            (MODE_MATCH_WISHLIST, None, Some(wishlist_item_id)) => {
                Ok(Self::MatchWishlist { wishlist_item_id })
            }
            (MODE_MATCH_LISTING, None, _) => Err(CoreError::Validation(
                "Mode 'match_listing' requires 'marketplaceListingId'".into(),
            )),
            (MODE_MATCH_WISHLIST, _, None) => Err(CoreError::Validation(
                "Mode 'match_wishlist' requires 'wishlistItemId'".into(),
            )),
            (MODE_MATCH_LISTING | MODE_MATCH_WISHLIST, Some(_), Some(_)) => {
                Err(CoreError::Validation(format!(
                    "Mode '{mode}' accepts exactly one of 'marketplaceListingId' or 'wishlistItemId'"
                )))
            }
            (other, _, _) => Err(invalid_mode(other)),
        }
    }
}

impl From<MatchRequest> for MatchRequestBody {
    fn from(request: MatchRequest) -> Self {
        let mut body = MatchRequestBody {
            mode: Some(request.mode().to_string()),
            ..Default::default()
        };
        match request {
            MatchRequest::MatchListing {
                marketplace_listing_id,
            } => body.marketplace_listing_id = Some(marketplace_listing_id),
            MatchRequest::MatchWishlist { wishlist_item_id } => {
                body.wishlist_item_id = Some(wishlist_item_id)
            }
        }
        body
    }
}

fn invalid_mode(mode: &str) -> CoreError {
    CoreError::Validation(format!(
        "Invalid mode '{mode}'. Must be one of: {}",
        VALID_MODES.join(", ")
    ))
}
