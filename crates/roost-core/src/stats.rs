//! Per-property statistics over a list of normalized reviews.
//!
//! Both aggregates are request-scoped and computed from whatever review list
//! the caller hands in; nothing is cached.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::review::NormalizedReview;

/// Aggregate figures for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStats {
  pub property_id:       String,
  /// Taken from the first review seen for the property.
  pub property_name:     String,
  pub average_rating:    f64,
  pub total_reviews:     usize,
  pub selected_reviews:  usize,
  /// Per-category rating sum divided by the property's review count, so a
  /// review without a category pulls that category's mean down.
  pub category_averages: BTreeMap<String, f64>,
}

/// The dashboard header: overall figures plus the per-property breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
  pub total_reviews:    usize,
  /// `0` when there are no reviews.
  pub average_rating:   f64,
  pub selected_reviews: usize,
  pub property_stats:   Vec<PropertyStats>,
}

#[derive(Default)]
struct Accumulator<'a> {
  property_id:   &'a str,
  property_name: &'a str,
  count:         usize,
  rating_sum:    f64,
  selected:      usize,
  categories:    BTreeMap<&'a str, f64>,
}

impl Accumulator<'_> {
  fn finish(self) -> PropertyStats {
    let count = self.count as f64;
    PropertyStats {
      property_id:       self.property_id.to_owned(),
      property_name:     self.property_name.to_owned(),
      average_rating:    self.rating_sum / count,
      total_reviews:     self.count,
      selected_reviews:  self.selected,
      category_averages: self
        .categories
        .into_iter()
        .map(|(name, sum)| (name.to_owned(), sum / count))
        .collect(),
    }
  }
}

/// Statistics per property, in order of first appearance.
///
/// Properties without reviews are absent, so no mean is ever taken over zero
/// items.
pub fn property_stats(reviews: &[NormalizedReview]) -> Vec<PropertyStats> {
  let mut slots: HashMap<&str, usize> = HashMap::new();
  let mut accumulators: Vec<Accumulator<'_>> = Vec::new();

  for review in reviews {
    let slot = *slots.entry(review.property_id.as_str()).or_insert_with(|| {
      accumulators.push(Accumulator {
        property_id: &review.property_id,
        property_name: &review.property_name,
        ..Default::default()
      });
      accumulators.len() - 1
    });

    let acc = &mut accumulators[slot];
    acc.count += 1;
    acc.rating_sum += review.rating;
    if review.is_selected {
      acc.selected += 1;
    }
    for category in &review.categories {
      *acc.categories.entry(category.category.as_str()).or_default() += category.rating;
    }
  }

  accumulators.into_iter().map(Accumulator::finish).collect()
}

/// Overall figures plus [`property_stats`].
pub fn summarize(reviews: &[NormalizedReview]) -> DashboardSummary {
  let total_reviews = reviews.len();
  let average_rating = if total_reviews == 0 {
    0.0
  } else {
    reviews.iter().map(|r| r.rating).sum::<f64>() / total_reviews as f64
  };

  DashboardSummary {
    total_reviews,
    average_rating,
    selected_reviews: reviews.iter().filter(|r| r.is_selected).count(),
    property_stats: property_stats(reviews),
  }
}
