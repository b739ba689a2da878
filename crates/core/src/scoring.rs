//! Weighted wishlist-to-listing match scoring.
//!
//! Five per-field similarities are combined with fixed weights into a single
//! 0-100 score. A listing has no manufacturer or pattern column, so those two
//! wishlist fields are compared against the listing's title and description
//! joined together.

use serde::{Deserialize, Serialize};

use crate::similarity::{optional_similarity, similarity};

// ---------------------------------------------------------------------------
// Weights and threshold
// ---------------------------------------------------------------------------

pub const NAME_WEIGHT: f64 = 0.50;
pub const CATEGORY_WEIGHT: f64 = 0.20;
pub const MANUFACTURER_WEIGHT: f64 = 0.15;
pub const PATTERN_WEIGHT: f64 = 0.10;
pub const DESCRIPTION_WEIGHT: f64 = 0.05;

/// Minimum combined score (inclusive) for a pair to be persisted as a match.
pub const MATCH_THRESHOLD: i32 = 80;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The wishlist fields that take part in scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct WishlistCriteria<'a> {
    pub item_name: &'a str,
    pub category: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub pattern: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// The listing fields that take part in scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingText<'a> {
    pub title: &'a str,
    pub category: Option<&'a str>,
    pub description: Option<&'a str>,
}

impl ListingText<'_> {
    /// Title and description joined by a single space.
    pub fn combined(&self) -> String {
        format!("{} {}", self.title, self.description.unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Unrounded per-field similarities, each in `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldScores {
    pub name: f64,
    pub category: f64,
    pub manufacturer: f64,
    pub pattern: f64,
    pub description: f64,
}

impl FieldScores {
    /// Weighted sum of the raw field scores, before rounding.
    pub fn weighted(&self) -> f64 {
        self.name * NAME_WEIGHT
            + self.category * CATEGORY_WEIGHT
            + self.manufacturer * MANUFACTURER_WEIGHT
            + self.pattern * PATTERN_WEIGHT
            + self.description * DESCRIPTION_WEIGHT
    }
}

/// Per-field breakdown stored alongside a match, each value rounded on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDetails {
    pub name_score: i32,
    pub category_score: i32,
    pub manufacturer_score: i32,
    pub pattern_score: i32,
    pub description_score: i32,
}

impl From<FieldScores> for MatchDetails {
    fn from(raw: FieldScores) -> Self {
        Self {
            name_score: raw.name.round() as i32,
            category_score: raw.category.round() as i32,
            manufacturer_score: raw.manufacturer.round() as i32,
            pattern_score: raw.pattern.round() as i32,
            description_score: raw.description.round() as i32,
        }
    }
}

/// Final score of a wishlist item against a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: i32,
    pub details: MatchDetails,
}

impl MatchScore {
    /// Combine raw field scores. The total is rounded from the unrounded
    /// weighted sum, not from the rounded details.
    pub fn from_fields(raw: FieldScores) -> Self {
        Self {
            score: raw.weighted().round() as i32,
            details: MatchDetails::from(raw),
        }
    }

    /// Whether the score clears [`MATCH_THRESHOLD`].
    pub fn qualifies(&self) -> bool {
        self.score >= MATCH_THRESHOLD
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Compute the raw per-field similarities of a wishlist item and a listing.
pub fn field_scores(wish: &WishlistCriteria<'_>, listing: &ListingText<'_>) -> FieldScores {
    let combined = listing.combined();

    FieldScores {
        name: similarity(wish.item_name, listing.title),
        category: optional_similarity(wish.category, listing.category),
        manufacturer: wish
            .manufacturer
            .map_or(0.0, |manufacturer| similarity(manufacturer, &combined)),
        pattern: wish
            .pattern
            .map_or(0.0, |pattern| similarity(pattern, &combined)),
        description: optional_similarity(wish.description, listing.description),
    }
}

/// Score a wishlist item against a listing.
pub fn score_match(wish: &WishlistCriteria<'_>, listing: &ListingText<'_>) -> MatchScore {
    MatchScore::from_fields(field_scores(wish, listing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: f64, category: f64, manufacturer: f64, pattern: f64, description: f64) -> FieldScores {
        FieldScores {
            name,
            category,
            manufacturer,
            pattern,
            description,
        }
    }

    #[test]
    fn perfect_name_and_category_alone_stay_below_threshold() {
        let score = MatchScore::from_fields(fields(100.0, 100.0, 0.0, 0.0, 0.0));
        assert_eq!(score.score, 70);
        assert!(!score.qualifies());
    }

    #[test]
    fn threshold_is_inclusive() {
        let at = MatchScore::from_fields(fields(100.0, 100.0, 0.0, 100.0, 0.0));
        assert_eq!(at.score, 80);
        assert!(at.qualifies());

        let below = MatchScore::from_fields(fields(98.0, 100.0, 0.0, 100.0, 0.0));
        assert_eq!(below.score, 79);
        assert!(!below.qualifies());
    }

    #[test]
    fn all_fields_perfect_scores_one_hundred() {
        let score = MatchScore::from_fields(fields(100.0, 100.0, 100.0, 100.0, 100.0));
        assert_eq!(score.score, 100);
    }

    #[test]
    fn details_are_rounded_independently_of_total() {
        let score = MatchScore::from_fields(fields(95.4, 100.0, 34.6, 0.0, 0.0));
        assert_eq!(score.details.name_score, 95);
        assert_eq!(score.details.manufacturer_score, 35);
        // 47.7 + 20 + 5.19 = 72.89
        assert_eq!(score.score, 73);
    }

    #[test]
    fn manufacturer_and_pattern_compare_against_title_and_description() {
        let wish = WishlistCriteria {
            item_name: "Mixing Bowl",
            manufacturer: Some("Pyrex"),
            pattern: Some("Butterprint"),
            ..Default::default()
        };
        let listing = ListingText {
            title: "Vintage Pyrex mixing bowl",
            category: None,
            description: Some("Butterprint pattern, turquoise on white"),
        };

        let raw = field_scores(&wish, &listing);
        assert_eq!(raw.manufacturer, 90.0);
        assert_eq!(raw.pattern, 90.0);
        assert_eq!(raw.category, 0.0);
        assert_eq!(raw.description, 0.0);
    }

    #[test]
    fn missing_optional_fields_score_zero() {
        let wish = WishlistCriteria {
            item_name: "Jadeite Bowl",
            ..Default::default()
        };
        let listing = ListingText {
            title: "Jadeite Bowl",
            category: Some("Glassware"),
            description: Some("Restaurant ware"),
        };

        let score = score_match(&wish, &listing);
        assert_eq!(
            score.details,
            MatchDetails {
                name_score: 100,
                ..Default::default()
            }
        );
        assert_eq!(score.score, 50);
    }

    #[test]
    fn near_identical_wording_misses_threshold() {
        let wish = WishlistCriteria {
            item_name: "Fire-King Jane Ray Bowl",
            category: Some("Pottery"),
            manufacturer: Some("Fire-King"),
            ..Default::default()
        };
        let listing = ListingText {
            title: "Fire King Jane Ray bowl",
            category: Some("pottery"),
            description: Some(""),
        };

        let score = score_match(&wish, &listing);
        assert_eq!(
            score.details,
            MatchDetails {
                name_score: 96,
                category_score: 100,
                manufacturer_score: 35,
                pattern_score: 0,
                description_score: 0,
            }
        );
        assert_eq!(score.score, 73);
        assert!(!score.qualifies());
    }

    #[test]
    fn details_serialize_with_field_names() {
        let json = serde_json::to_value(MatchDetails {
            name_score: 100,
            category_score: 90,
            manufacturer_score: 0,
            pattern_score: 0,
            description_score: 5,
        })
        .unwrap();
        assert_eq!(json["name_score"], 100);
        assert_eq!(json["category_score"], 90);
        assert_eq!(json["description_score"], 5);
    }
}
