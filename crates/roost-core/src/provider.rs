//! Provider wire types: the shapes upstream APIs actually return.
//!
//! Each provider's payload is an explicit serde struct. Required fields are
//! plain types; fields the provider may omit or null out are `Option`. Records
//! are deserialised one at a time at the adapter boundary so a single bad
//! record is dropped without discarding its siblings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::review::ReviewId;

// ─── Hostaway ────────────────────────────────────────────────────────────────

/// A category sub-score as Hostaway reports it (`cleanliness`,
/// `respect_house_rules`, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostawayCategory {
  pub category: String,
  pub rating:   f64,
}

/// One entry of the Hostaway `GET /reviews` result array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostawayReview {
  pub id:              ReviewId,
  #[serde(rename = "type")]
  pub kind:            String,
  pub status:          String,
  /// Overall rating; Hostaway frequently sends `null` and only categories.
  #[serde(default)]
  pub rating:          Option<f64>,
  #[serde(default)]
  pub public_review:   Option<String>,
  #[serde(default)]
  pub review_category: Option<Vec<HostawayCategory>>,
  /// Usually `YYYY-MM-DD HH:MM:SS`.
  pub submitted_at:    String,
  pub guest_name:      String,
  /// Free-text listing title; the property is inferred from it.
  pub listing_name:    String,
  #[serde(default)]
  pub channel:         Option<String>,
}

/// Envelope of the Hostaway `GET /reviews` response.
///
/// `result` is kept as raw JSON so each record can be validated on its own.
#[derive(Debug, Clone, Deserialize)]
pub struct HostawayEnvelope {
  pub status: String,
  #[serde(default)]
  pub result: Option<serde_json::Value>,
}

// ─── Google Places ───────────────────────────────────────────────────────────

/// One review inside a Google Place Details response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleReview {
  #[serde(default)]
  pub author_name:               String,
  #[serde(default)]
  pub author_url:                Option<String>,
  /// 1–5 stars.
  pub rating:                    f64,
  #[serde(default)]
  pub relative_time_description: String,
  #[serde(default)]
  pub text:                      String,
  /// Seconds since the Unix epoch; `0` when absent.
  #[serde(default)]
  pub time:                      i64,
  #[serde(default)]
  pub profile_photo_url:         Option<String>,
}

/// The `result` object of a Place Details response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GooglePlaceResult {
  #[serde(default)]
  pub name:               Option<String>,
  #[serde(default)]
  pub reviews:            Option<Vec<serde_json::Value>>,
  #[serde(default)]
  pub rating:             Option<f64>,
  #[serde(default)]
  pub user_ratings_total: Option<u64>,
  #[serde(default)]
  pub formatted_address:  Option<String>,
  #[serde(default)]
  pub url:                Option<String>,
}

/// Envelope of a Place Details response.
#[derive(Debug, Clone, Deserialize)]
pub struct GooglePlaceDetails {
  pub status:        String,
  #[serde(default)]
  pub result:        Option<GooglePlaceResult>,
  #[serde(default)]
  pub error_message: Option<String>,
}

/// Display names derived from a Google author name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerName {
  pub full:  String,
  pub first: String,
}

/// A Google review after the adapter has attached the property it belongs to
/// and derived its synthetic id and display name.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleRecord {
  pub review_id:    ReviewId,
  pub property_id:  String,
  pub reviewer:     ReviewerName,
  pub submitted_at: DateTime<Utc>,
  pub rating:       f64,
  pub text:         String,
}

// ─── RawReview ───────────────────────────────────────────────────────────────

/// A provider-native review as returned by a
/// [`ReviewSource`](crate::source::ReviewSource), before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReview {
  /// Property is unknown; it is inferred from the listing name.
  Hostaway(HostawayReview),
  /// Property is known to the adapter and embedded in the record.
  Google(GoogleRecord),
}

impl RawReview {
  pub fn id(&self) -> ReviewId {
    match self {
      Self::Hostaway(r) => r.id,
      Self::Google(r) => r.review_id,
    }
  }
}
