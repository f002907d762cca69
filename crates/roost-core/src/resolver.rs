//! Mapping free-text listing names to property ids.
//!
//! Hostaway does not tell us which property a review belongs to, only the
//! listing title. [`PropertyResolver`] isolates that lookup so it can be
//! replaced by an explicit mapping without touching the normalizer.

use crate::catalog::PropertyCatalog;

/// Resolve the property id for a listing name. Must always return an id.
pub trait PropertyResolver: Send + Sync {
  fn resolve(&self, listing_name: &str) -> String;
}

/// Substring matching against a fragment table, with a fallback id.
///
/// Fragments are checked in order and the first match wins.
#[derive(Debug, Clone)]
pub struct FragmentResolver {
  fragments: Vec<(String, String)>,
  fallback:  String,
}

impl FragmentResolver {
  /// `fragments` is a list of `(fragment, property_id)` pairs.
  pub fn new(fragments: Vec<(String, String)>, fallback: impl Into<String>) -> Self {
    Self {
      fragments: fragments
        .into_iter()
        .filter(|(fragment, _)| !fragment.is_empty())
        .collect(),
      fallback:  fallback.into(),
    }
  }

  /// Build the table from each property's `listing_fragment`, in catalog
  /// order; the first property is the fallback.
  pub fn from_catalog(catalog: &PropertyCatalog) -> Self {
    let fragments = catalog
      .all()
      .iter()
      .filter_map(|p| {
        p.listing_fragment
          .as_ref()
          .map(|fragment| (fragment.clone(), p.id.clone()))
      })
      .collect();
    Self::new(fragments, catalog.first().id.clone())
  }
}

impl PropertyResolver for FragmentResolver {
  fn resolve(&self, listing_name: &str) -> String {
    match self
      .fragments
      .iter()
      .find(|(fragment, _)| listing_name.contains(fragment.as_str()))
    {
      Some((_, id)) => id.clone(),
      None => {
        tracing::warn!(
          listing_name,
          fallback = %self.fallback,
          "listing name matches no known property, using fallback"
        );
        self.fallback.clone()
      }
    }
  }
}
