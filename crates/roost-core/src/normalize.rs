//! Normalization: provider-native records to [`NormalizedReview`].
//!
//! Everything here is a pure function of its inputs. The selection set and
//! property lookups are passed in through [`NormalizeContext`].

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::{
  catalog::PropertyCatalog,
  provider::{GoogleRecord, HostawayCategory, HostawayReview, RawReview},
  resolver::PropertyResolver,
  review::{NormalizedReview, ReviewCategory},
  selection::SelectionSet,
};

/// Channel assumed for Hostaway records that do not carry one.
pub const DEFAULT_HOSTAWAY_CHANNEL: &str = "Airbnb";

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 10.0;

/// Lookups a normalization pass needs. Built once per read.
pub struct NormalizeContext<'a> {
  pub catalog:   &'a PropertyCatalog,
  pub resolver:  &'a dyn PropertyResolver,
  pub selection: &'a SelectionSet,
}

/// Map one raw record to the canonical review shape.
pub fn normalize(raw: RawReview, ctx: &NormalizeContext<'_>) -> NormalizedReview {
  match raw {
    RawReview::Hostaway(review) => normalize_hostaway(review, ctx),
    RawReview::Google(record) => normalize_google(record, ctx),
  }
}

fn normalize_hostaway(
  review: HostawayReview,
  ctx: &NormalizeContext<'_>,
) -> NormalizedReview {
  let property_id = ctx.resolver.resolve(&review.listing_name);
  let categories = review.review_category.unwrap_or_default();
  let rating = derive_rating(review.rating, &categories);

  NormalizedReview {
    id: review.id,
    property_image: ctx.catalog.first_image(&property_id).to_owned(),
    property_id,
    property_name: review.listing_name,
    guest_name: format_guest_name(&review.guest_name),
    guest_first_name: first_name(&review.guest_name),
    rating,
    review_text: review.public_review.unwrap_or_default(),
    categories: categories
      .into_iter()
      .map(|c| ReviewCategory {
        category: category_label(&c.category),
        rating:   c.rating,
      })
      .collect(),
    date_formatted: format_date(&review.submitted_at),
    date: review.submitted_at,
    channel: review
      .channel
      .filter(|c| !c.trim().is_empty())
      .unwrap_or_else(|| DEFAULT_HOSTAWAY_CHANNEL.to_owned()),
    kind: review.kind,
    status: review.status,
    is_selected: ctx.selection.contains(review.id),
  }
}

fn normalize_google(
  record: GoogleRecord,
  ctx: &NormalizeContext<'_>,
) -> NormalizedReview {
  let date = record
    .submitted_at
    .to_rfc3339_opts(SecondsFormat::Millis, true);
  let property_name = ctx
    .catalog
    .get(&record.property_id)
    .map(|p| p.name.clone())
    .unwrap_or_else(|| record.property_id.clone());

  NormalizedReview {
    id: record.review_id,
    property_image: ctx.catalog.first_image(&record.property_id).to_owned(),
    property_name,
    property_id: record.property_id,
    guest_name: record.reviewer.full,
    guest_first_name: record.reviewer.first,
    rating: clamp_rating(record.rating),
    review_text: record.text,
    categories: Vec::new(),
    date_formatted: format_date(&date),
    date,
    channel: "Google".to_owned(),
    kind: "guest-to-host".to_owned(),
    status: "published".to_owned(),
    is_selected: ctx.selection.contains(record.review_id),
  }
}

// ─── Ratings ─────────────────────────────────────────────────────────────────

/// The provider's overall rating if present, otherwise the category mean.
pub fn derive_rating(direct: Option<f64>, categories: &[HostawayCategory]) -> f64 {
  clamp_rating(direct.unwrap_or_else(|| average_category_rating(categories)))
}

/// Mean of the category ratings rounded to one decimal; `0` with no
/// categories.
pub fn average_category_rating(categories: &[HostawayCategory]) -> f64 {
  if categories.is_empty() {
    return 0.0;
  }
  let sum: f64 = categories.iter().map(|c| c.rating).sum();
  round_to_tenth(sum / categories.len() as f64)
}

fn round_to_tenth(value: f64) -> f64 { (value * 10.0).round() / 10.0 }

/// Pin a rating into `[0, MAX_RATING]`; non-finite values become `0`.
pub fn clamp_rating(rating: f64) -> f64 {
  if rating.is_finite() {
    rating.clamp(0.0, MAX_RATING)
  } else {
    0.0
  }
}

// ─── Names and labels ────────────────────────────────────────────────────────

/// `"John Smith"` → `"John S."`; single-token names are returned unchanged.
pub fn format_guest_name(full_name: &str) -> String {
  let parts: Vec<&str> = full_name.split_whitespace().collect();
  match parts.as_slice() {
    [first, .., last] => {
      let initial = last.chars().next().map(String::from).unwrap_or_default();
      format!("{first} {initial}.")
    }
    _ => full_name.to_owned(),
  }
}

fn first_name(full_name: &str) -> String {
  full_name
    .split_whitespace()
    .next()
    .unwrap_or_default()
    .to_owned()
}

/// `"respect_house_rules"` → `"respect house rules"`.
pub fn category_label(raw: &str) -> String { raw.replace('_', " ") }

// ─── Dates ───────────────────────────────────────────────────────────────────

/// Parse a provider timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM[:SS[.fff]]` (with either a space or a
/// `T` separator) and bare `YYYY-MM-DD`. Naive values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc));
  }

  let normalized = if raw.contains('T') {
    Cow::Borrowed(raw)
  } else {
    Cow::Owned(raw.replacen(' ', "T", 1))
  };

  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(&normalized, format) {
      return Some(dt.and_utc());
    }
  }

  NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
    .ok()
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .map(|dt| dt.and_utc())
}

/// Render a timestamp as `"July 4, 2024"`; unparseable input is returned
/// unchanged.
pub fn format_date(raw: &str) -> String {
  match parse_timestamp(raw) {
    Some(dt) => dt.format("%B %-d, %Y").to_string(),
    None => raw.to_owned(),
  }
}
