//! The canonical review shape served to the dashboard and property pages.
//!
//! A [`NormalizedReview`] is a value object rebuilt on every read. Nothing in
//! the service stores one; the `is_selected` flag is recomputed against the
//! current selection set each time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::parse_timestamp;

/// Numeric review identifier. Hostaway ids are the provider's own; Google ids
/// are synthesised and can collide.
pub type ReviewId = i64;

/// A single sub-score within a review, e.g. `cleanliness: 10`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCategory {
  /// Human-readable label; underscores from the provider are spaces here.
  pub category: String,
  pub rating:   f64,
}

/// One guest review after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
  pub id:               ReviewId,
  pub property_id:      String,
  pub property_name:    String,
  pub property_image:   String,
  /// Display form, "First L." for multi-token names.
  pub guest_name:       String,
  pub guest_first_name: String,
  /// Overall score on a 0–10 scale.
  pub rating:           f64,
  pub review_text:      String,
  pub categories:       Vec<ReviewCategory>,
  /// Submission timestamp as supplied by the provider (ISO-ish).
  pub date:             String,
  /// Long-form date, e.g. "July 4, 2024"; the raw `date` if unparseable.
  pub date_formatted:   String,
  /// Originating platform, e.g. "Airbnb", "Google".
  pub channel:          String,
  #[serde(rename = "type")]
  pub kind:             String,
  pub status:           String,
  pub is_selected:      bool,
}

impl NormalizedReview {
  /// The parsed submission timestamp, or `None` if `date` is unparseable.
  pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
    parse_timestamp(&self.date)
  }
}
