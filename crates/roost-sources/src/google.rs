//! Google Place Details adapter.
//!
//! Google reviews come back per place, so the adapter walks the catalog and
//! queries every property that carries a `googlePlaceId`. Google has no
//! stable review id; one is synthesised from the property id, the review's
//! position in the response and the last three digits of its timestamp.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use roost_core::{
  catalog::PropertyCatalog,
  property::Property,
  provider::{GooglePlaceDetails, GoogleRecord, GoogleReview, RawReview, ReviewerName},
  review::ReviewId,
  source::ReviewSource,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, credential};

pub const DEFAULT_ENDPOINT: &str =
  "https://maps.googleapis.com/maps/api/place/details/json";

const FIELDS: &str = "name,rating,user_ratings_total,reviews,formatted_address,url";

fn default_endpoint() -> String { DEFAULT_ENDPOINT.to_owned() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleConfig {
  #[serde(default = "default_endpoint")]
  pub endpoint: String,
  #[serde(default)]
  pub api_key:  Option<String>,
}

impl Default for GoogleConfig {
  fn default() -> Self {
    Self {
      endpoint: default_endpoint(),
      api_key:  None,
    }
  }
}

pub struct GoogleSource {
  client:  Client,
  config:  GoogleConfig,
  catalog: Arc<PropertyCatalog>,
}

impl GoogleSource {
  pub fn new(client: Client, config: GoogleConfig, catalog: Arc<PropertyCatalog>) -> Self {
    Self {
      client,
      config,
      catalog,
    }
  }

  pub fn is_configured(&self) -> bool { credential(&self.config.api_key).is_some() }

  async fn fetch_place(
    &self,
    property: &Property,
    place_id: &str,
    api_key: &str,
  ) -> Result<Vec<GoogleRecord>> {
    let response = self
      .client
      .get(&self.config.endpoint)
      .query(&[("place_id", place_id), ("fields", FIELDS), ("key", api_key)])
      .send()
      .await?;
    if !response.status().is_success() {
      return Err(Error::Status(response.status()));
    }

    let details: GooglePlaceDetails = response.json().await?;
    if details.status != "OK" {
      return Err(Error::Payload(format!(
        "status {:?}: {}",
        details.status,
        details.error_message.as_deref().unwrap_or("no message")
      )));
    }

    let reviews = details.result.and_then(|r| r.reviews).unwrap_or_default();
    let now = Utc::now();
    let mut records = Vec::with_capacity(reviews.len());
    for (index, value) in reviews.into_iter().enumerate() {
      let review: GoogleReview = match serde_json::from_value(value) {
        Ok(review) => review,
        Err(e) => {
          tracing::warn!(property_id = %property.id, index, error = %e, "dropping malformed google review");
          continue;
        }
      };
      match to_record(&property.id, index, review, now) {
        Some(record) => records.push(record),
        None => tracing::warn!(
          property_id = %property.id,
          index,
          "cannot derive a numeric review id, skipping"
        ),
      }
    }
    Ok(records)
  }
}

#[async_trait]
impl ReviewSource for GoogleSource {
  fn name(&self) -> &str { "google" }

  async fn fetch_reviews(&self) -> Vec<RawReview> {
    let Some(api_key) = credential(&self.config.api_key) else {
      tracing::warn!("google places api key not configured, skipping");
      return Vec::new();
    };

    let fetches = self.catalog.all().iter().filter_map(|property| {
      let place_id = property.google_place_id.as_deref()?;
      Some(async move {
        match self.fetch_place(property, place_id, api_key).await {
          Ok(records) => records,
          Err(e) => {
            tracing::error!(property_id = %property.id, place_id, error = %e, "google fetch failed");
            Vec::new()
          }
        }
      })
    });

    join_all(fetches)
      .await
      .into_iter()
      .flatten()
      .map(RawReview::Google)
      .collect()
  }
}

// ─── Record derivation ───────────────────────────────────────────────────────

fn to_record(
  property_id: &str,
  index: usize,
  review: GoogleReview,
  now: DateTime<Utc>,
) -> Option<GoogleRecord> {
  let time = if review.time > 0 { review.time } else { now.timestamp() };
  Some(GoogleRecord {
    review_id:    synthetic_review_id(property_id, index, time)?,
    property_id:  property_id.to_owned(),
    reviewer:     reviewer_name(&review.author_name),
    submitted_at: DateTime::from_timestamp(time, 0).unwrap_or(now),
    rating:       review.rating,
    text:         review.text,
  })
}

/// Concatenate property id, index and `time mod 1000` as decimal digits.
///
/// Distinct reviews can collide (`"1"`,`11` vs `"11"`,`1`); `None` when the
/// property id is not numeric or the result overflows.
pub fn synthetic_review_id(property_id: &str, index: usize, time: i64) -> Option<ReviewId> {
  format!("{property_id}{index}{}", time.rem_euclid(1000))
    .parse()
    .ok()
}

/// `"Jane Q Public"` becomes `"Jane P."`/`"Jane"`; a single token is used
/// as-is; a blank name becomes `"Google Reviewer"`/`"Guest"`.
pub fn reviewer_name(author: &str) -> ReviewerName {
  let parts: Vec<&str> = author.split_whitespace().collect();
  match parts.as_slice() {
    [] => ReviewerName {
      full:  "Google Reviewer".into(),
      first: "Guest".into(),
    },
    [only] => ReviewerName {
      full:  (*only).to_owned(),
      first: (*only).to_owned(),
    },
    [first, .., last] => {
      let initial: String = last.chars().take(1).flat_map(char::to_uppercase).collect();
      ReviewerName {
        full:  format!("{first} {initial}."),
        first: (*first).to_owned(),
      }
    }
  }
}
