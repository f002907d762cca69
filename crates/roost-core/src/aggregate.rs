//! [`ReviewService`]: merges every source into one sorted review list.
//!
//! This is the read path of the service: fan out to all sources
//! concurrently, normalize against the current selection set, merge, sort.
//! It also fronts the selection store for the toggle write path.

use std::{collections::HashSet, sync::Arc};

use futures::future::join_all;

use crate::{
  catalog::PropertyCatalog,
  filter::{ReviewFilter, SortOrder, sort_reviews},
  normalize::{NormalizeContext, normalize},
  resolver::{FragmentResolver, PropertyResolver},
  review::{NormalizedReview, ReviewId},
  selection::SelectionStore,
  source::ReviewSource,
  stats::{DashboardSummary, summarize},
};

/// Owns the sources, the selection store and the property lookups.
///
/// Construct once at start-up and share behind an `Arc`.
pub struct ReviewService<S> {
  sources:    Vec<Arc<dyn ReviewSource>>,
  selections: S,
  catalog:    Arc<PropertyCatalog>,
  resolver:   Arc<dyn PropertyResolver>,
}

impl<S: SelectionStore> ReviewService<S> {
  /// A service with no sources, resolving listing names against `catalog`.
  pub fn new(catalog: Arc<PropertyCatalog>, selections: S) -> Self {
    let resolver = Arc::new(FragmentResolver::from_catalog(&catalog));
    Self {
      sources: Vec::new(),
      selections,
      catalog,
      resolver,
    }
  }

  /// Register a source. Results are merged in registration order before
  /// sorting.
  pub fn with_source(mut self, source: impl ReviewSource + 'static) -> Self {
    self.sources.push(Arc::new(source));
    self
  }

  pub fn with_resolver(mut self, resolver: impl PropertyResolver + 'static) -> Self {
    self.resolver = Arc::new(resolver);
    self
  }

  pub fn catalog(&self) -> &PropertyCatalog { &self.catalog }

  pub fn selections(&self) -> &S { &self.selections }

  pub fn source_names(&self) -> Vec<&str> {
    self.sources.iter().map(|s| s.name()).collect()
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every review from every source, newest first.
  ///
  /// Sources are fetched concurrently; one that fails contributes nothing.
  /// Reviews with identical timestamps keep their production order.
  pub async fn all_reviews(&self) -> Vec<NormalizedReview> {
    let fetches = self.sources.iter().map(|source| async move {
      let records = source.fetch_reviews().await;
      tracing::debug!(source = source.name(), count = records.len(), "fetched reviews");
      records
    });
    let (batches, selection) =
      futures::join!(join_all(fetches), self.selections.selected_ids());

    let ctx = NormalizeContext {
      catalog:   &self.catalog,
      resolver:  self.resolver.as_ref(),
      selection: &selection,
    };
    let mut reviews: Vec<NormalizedReview> = batches
      .into_iter()
      .flatten()
      .map(|raw| normalize(raw, &ctx))
      .collect();

    warn_on_duplicate_ids(&reviews);
    sort_reviews(&mut reviews, SortOrder::DateDesc);
    reviews
  }

  pub async fn reviews_for_property(&self, property_id: &str) -> Vec<NormalizedReview> {
    let mut reviews = self.all_reviews().await;
    reviews.retain(|r| r.property_id == property_id);
    reviews
  }

  /// The reviews an operator has chosen to show on the property's page.
  pub async fn selected_reviews_for_property(
    &self,
    property_id: &str,
  ) -> Vec<NormalizedReview> {
    let mut reviews = self.reviews_for_property(property_id).await;
    reviews.retain(|r| r.is_selected);
    reviews
  }

  pub async fn filtered_reviews(&self, filter: &ReviewFilter) -> Vec<NormalizedReview> {
    filter.apply(self.all_reviews().await)
  }

  pub async fn summary(&self) -> DashboardSummary {
    summarize(&self.all_reviews().await)
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Flip a review's visibility; returns `true` if it is now selected.
  pub async fn toggle_selection(&self, review_id: ReviewId) -> Result<bool, S::Error> {
    let selected = self.selections.toggle(review_id).await?;
    tracing::info!(review_id, selected, "toggled review selection");
    Ok(selected)
  }
}

fn warn_on_duplicate_ids(reviews: &[NormalizedReview]) {
  let mut seen = HashSet::with_capacity(reviews.len());
  let duplicates: Vec<ReviewId> = reviews
    .iter()
    .map(|r| r.id)
    .filter(|id| !seen.insert(*id))
    .collect();
  if !duplicates.is_empty() {
    tracing::warn!(
      ?duplicates,
      "review ids collide across sources; selection applies to all of them"
    );
  }
}
