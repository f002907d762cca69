//! Property: static descriptive record for a rental unit.

use serde::{Deserialize, Serialize};

/// Read-only reference data about a property. Not derived from reviews:
/// `average_rating` and `total_reviews` are the catalog's own figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
  pub id:               String,
  pub name:             String,
  pub location:         String,
  #[serde(default)]
  pub description:      String,
  pub bedrooms:         u32,
  pub bathrooms:        u32,
  pub max_guests:       u32,
  pub price_per_night:  f64,
  #[serde(default)]
  pub images:           Vec<String>,
  #[serde(default)]
  pub amenities:        Vec<String>,
  #[serde(default)]
  pub average_rating:   f64,
  #[serde(default)]
  pub total_reviews:    u32,
  /// Google place this property is linked to, if any.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub google_place_id:  Option<String>,
  /// Substring identifying this property inside Hostaway listing names.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub listing_fragment: Option<String>,
}
