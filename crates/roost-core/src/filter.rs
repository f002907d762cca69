//! Dashboard filtering and sorting of normalized reviews.

use std::cmp::Reverse;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::review::NormalizedReview;

/// Sentinel value meaning "no restriction" for property and channel filters.
pub const ANY: &str = "all";

/// Sort orders offered by the dashboard. All are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
  /// Newest first; unparseable dates last.
  #[default]
  DateDesc,
  /// Oldest first; unparseable dates last.
  DateAsc,
  RatingDesc,
  RatingAsc,
}

/// Criteria for narrowing down the merged review list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
  pub property_id: Option<String>,
  pub min_rating:  Option<f64>,
  pub max_rating:  Option<f64>,
  pub channel:     Option<String>,
  /// Inclusive, compared against the UTC calendar date of submission.
  pub start_date:  Option<NaiveDate>,
  /// Inclusive.
  pub end_date:    Option<NaiveDate>,
  /// Case-insensitive substring of guest name or review text.
  pub search:      Option<String>,
  pub sort:        SortOrder,
}

impl ReviewFilter {
  pub fn matches(&self, review: &NormalizedReview) -> bool {
    if let Some(id) = restricting(&self.property_id)
      && review.property_id != id
    {
      return false;
    }
    if let Some(channel) = restricting(&self.channel)
      && review.channel != channel
    {
      return false;
    }
    if self.min_rating.is_some_and(|min| review.rating < min) {
      return false;
    }
    if self.max_rating.is_some_and(|max| review.rating > max) {
      return false;
    }

    if self.start_date.is_some() || self.end_date.is_some() {
      let Some(day) = review.submitted_at().map(|dt| dt.date_naive()) else {
        return false;
      };
      if self.start_date.is_some_and(|start| day < start)
        || self.end_date.is_some_and(|end| day > end)
      {
        return false;
      }
    }

    if let Some(query) = self.search.as_deref().map(str::trim)
      && !query.is_empty()
    {
      let query = query.to_lowercase();
      return review.guest_name.to_lowercase().contains(&query)
        || review.review_text.to_lowercase().contains(&query);
    }

    true
  }

  /// Keep the matching reviews and sort them.
  pub fn apply(&self, mut reviews: Vec<NormalizedReview>) -> Vec<NormalizedReview> {
    reviews.retain(|r| self.matches(r));
    sort_reviews(&mut reviews, self.sort);
    reviews
  }
}

fn restricting(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty() && *v != ANY)
}

/// Stable sort in the requested order.
pub fn sort_reviews(reviews: &mut [NormalizedReview], order: SortOrder) {
  match order {
    SortOrder::DateDesc => {
      reviews.sort_by_cached_key(|r| Reverse(r.submitted_at()));
    }
    SortOrder::DateAsc => {
      reviews.sort_by_cached_key(|r| {
        let at = r.submitted_at();
        (at.is_none(), at)
      });
    }
    SortOrder::RatingDesc => reviews.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    SortOrder::RatingAsc => reviews.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn review(id: i64, property: &str, rating: f64, date: &str) -> NormalizedReview {
    NormalizedReview {
      id,
      property_id: property.into(),
      property_name: format!("Property {property}"),
      property_image: String::new(),
      guest_name: "Jane D.".into(),
      guest_first_name: "Jane".into(),
      rating,
      review_text: "Spotless and quiet".into(),
      categories: vec![],
      date: date.into(),
      date_formatted: String::new(),
      channel: "Airbnb".into(),
      kind: "guest-to-host".into(),
      status: "published".into(),
      is_selected: false,
    }
  }

  fn ids(reviews: &[NormalizedReview]) -> Vec<i64> {
    reviews.iter().map(|r| r.id).collect()
  }

  #[test]
  fn default_filter_keeps_everything_newest_first() {
    let reviews = vec![
      review(1, "1", 8.0, "2024-01-01 10:00:00"),
      review(2, "1", 9.0, "2024-03-01 10:00:00"),
      review(3, "2", 7.0, "2024-02-01 10:00:00"),
    ];
    let out = ReviewFilter::default().apply(reviews);
    assert_eq!(ids(&out), vec![2, 3, 1]);
  }

  #[test]
  fn date_sort_is_stable_and_puts_garbage_last() {
    let reviews = vec![
      review(1, "1", 8.0, "not a date"),
      review(2, "1", 8.0, "2024-01-01 10:00:00"),
      review(3, "1", 8.0, "2024-01-01T10:00:00"),
      review(4, "1", 8.0, "2023-01-01"),
    ];

    let mut desc = reviews.clone();
    sort_reviews(&mut desc, SortOrder::DateDesc);
    assert_eq!(ids(&desc), vec![2, 3, 4, 1]);

    let mut asc = reviews;
    sort_reviews(&mut asc, SortOrder::DateAsc);
    assert_eq!(ids(&asc), vec![4, 2, 3, 1]);
  }

  #[test]
  fn rating_sorts() {
    let reviews = vec![
      review(1, "1", 7.0, "2024-01-01"),
      review(2, "1", 9.5, "2024-01-01"),
      review(3, "1", 7.0, "2024-01-01"),
    ];
    let mut desc = reviews.clone();
    sort_reviews(&mut desc, SortOrder::RatingDesc);
    assert_eq!(ids(&desc), vec![2, 1, 3]);

    let mut asc = reviews;
    sort_reviews(&mut asc, SortOrder::RatingAsc);
    assert_eq!(ids(&asc), vec![1, 3, 2]);
  }

  #[test]
  fn property_channel_and_rating_bounds() {
    let mut booking = review(4, "2", 9.0, "2024-01-04");
    booking.channel = "Booking.com".into();
    let reviews = vec![
      review(1, "1", 6.0, "2024-01-01"),
      review(2, "1", 8.0, "2024-01-02"),
      review(3, "2", 10.0, "2024-01-03"),
      booking,
    ];

    let by_property = ReviewFilter {
      property_id: Some("1".into()),
      ..Default::default()
    };
    assert_eq!(ids(&by_property.apply(reviews.clone())), vec![2, 1]);

    let all_properties = ReviewFilter {
      property_id: Some(ANY.into()),
      ..Default::default()
    };
    assert_eq!(all_properties.apply(reviews.clone()).len(), 4);

    let by_channel = ReviewFilter {
      channel: Some("Booking.com".into()),
      ..Default::default()
    };
    assert_eq!(ids(&by_channel.apply(reviews.clone())), vec![4]);

    let bounded = ReviewFilter {
      min_rating: Some(7.0),
      max_rating: Some(9.0),
      ..Default::default()
    };
    assert_eq!(ids(&bounded.apply(reviews)), vec![4, 2]);
  }

  #[test]
  fn date_range_is_inclusive_and_drops_unparseable() {
    let reviews = vec![
      review(1, "1", 8.0, "2024-01-01 23:59:00"),
      review(2, "1", 8.0, "2024-01-15 00:00:00"),
      review(3, "1", 8.0, "2024-02-01 00:00:00"),
      review(4, "1", 8.0, "unknown"),
    ];
    let filter = ReviewFilter {
      start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
      end_date: NaiveDate::from_ymd_opt(2024, 1, 15),
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(reviews)), vec![2, 1]);
  }

  #[test]
  fn search_is_case_insensitive_over_name_and_text() {
    let mut by_name = review(1, "1", 8.0, "2024-01-01");
    by_name.guest_name = "Oliver T.".into();
    let mut by_text = review(2, "1", 8.0, "2024-01-02");
    by_text.review_text = "The OLIVE tree outside was lovely".into();
    let other = review(3, "1", 8.0, "2024-01-03");

    let filter = ReviewFilter {
      search: Some("  olive ".into()),
      ..Default::default()
    };
    assert_eq!(ids(&filter.apply(vec![by_name, by_text, other])), vec![2, 1]);

    let blank = ReviewFilter {
      search: Some("   ".into()),
      ..Default::default()
    };
    assert!(blank.matches(&review(9, "1", 1.0, "x")));
  }
}
