//! The selection set and the `SelectionStore` trait.
//!
//! Membership in the selection set is the only source of truth for a review's
//! `is_selected` flag. The trait is implemented by storage backends (e.g.
//! `roost-store-file`); the API layer depends on this abstraction only.

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};

use crate::review::ReviewId;

// ─── SelectionSet ────────────────────────────────────────────────────────────

/// The review ids an operator has marked visible, in the order they were
/// selected. Serialises as `{"selectedReviewIds": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSet {
  #[serde(default, deserialize_with = "null_as_empty")]
  selected_review_ids: Vec<ReviewId>,
}

impl SelectionSet {
  pub fn new() -> Self { Self::default() }

  /// Build a set from ids, keeping the first occurrence of each.
  pub fn from_ids(ids: impl IntoIterator<Item = ReviewId>) -> Self {
    let mut set = Self::new();
    for id in ids {
      if !set.contains(id) {
        set.selected_review_ids.push(id);
      }
    }
    set
  }

  pub fn contains(&self, id: ReviewId) -> bool {
    self.selected_review_ids.contains(&id)
  }

  /// Flip membership of `id`; returns `true` if it is now selected.
  pub fn toggle(&mut self, id: ReviewId) -> bool {
    if self.contains(id) {
      self.selected_review_ids.retain(|existing| *existing != id);
      false
    } else {
      self.selected_review_ids.push(id);
      true
    }
  }

  pub fn ids(&self) -> &[ReviewId] { &self.selected_review_ids }

  pub fn len(&self) -> usize { self.selected_review_ids.len() }

  pub fn is_empty(&self) -> bool { self.selected_review_ids.is_empty() }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReviewId>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<ReviewId>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over where the selection set lives.
///
/// Reads never fail: a store that cannot read its backing state reports an
/// empty set ("nothing selected"). Only `toggle` can fail, when the new state
/// cannot be persisted.
pub trait SelectionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Current membership.
  fn selected_ids(&self) -> impl Future<Output = SelectionSet> + Send + '_;

  /// Flip membership of `review_id`, persist, and return the new state
  /// (`true` = now selected).
  fn toggle(
    &self,
    review_id: ReviewId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn is_selected(
    &self,
    review_id: ReviewId,
  ) -> impl Future<Output = bool> + Send + '_ {
    async move { self.selected_ids().await.contains(review_id) }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_is_its_own_inverse() {
    let mut set = SelectionSet::from_ids([1, 2, 3]);
    let before = set.clone();
    for id in [2, 42, -7] {
      let first = set.toggle(id);
      let second = set.toggle(id);
      assert_ne!(first, second);
      assert_eq!(set.contains(id), before.contains(id));
    }
  }

  #[test]
  fn toggle_reports_new_state() {
    let mut set = SelectionSet::new();
    assert!(set.toggle(42));
    assert_eq!(set.ids(), &[42]);
    assert!(!set.toggle(42));
    assert!(set.is_empty());
  }

  #[test]
  fn from_ids_drops_duplicates_keeping_order() {
    let set = SelectionSet::from_ids([3, 1, 3, 2, 1]);
    assert_eq!(set.ids(), &[3, 1, 2]);
  }

  #[test]
  fn serialises_with_camel_case_key() {
    let set = SelectionSet::from_ids([5, 9]);
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json, serde_json::json!({ "selectedReviewIds": [5, 9] }));
  }

  #[test]
  fn null_or_missing_ids_deserialise_as_empty() {
    let null: SelectionSet =
      serde_json::from_str(r#"{"selectedReviewIds": null}"#).unwrap();
    let missing: SelectionSet = serde_json::from_str("{}").unwrap();
    assert!(null.is_empty());
    assert!(missing.is_empty());
  }
}
