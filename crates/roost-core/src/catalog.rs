//! The property catalog: a static, read-only lookup of [`Property`] records.

use std::collections::HashSet;

use crate::{Error, Result, property::Property};

/// Image shown for properties that have none of their own.
pub const PLACEHOLDER_IMAGE: &str =
  "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800";

/// An ordered, non-empty collection of properties with unique ids.
///
/// Order matters: the first property is the fallback when a listing name
/// cannot be matched to any property.
#[derive(Debug, Clone)]
pub struct PropertyCatalog {
  properties: Vec<Property>,
}

impl PropertyCatalog {
  pub fn new(properties: Vec<Property>) -> Result<Self> {
    if properties.is_empty() {
      return Err(Error::EmptyCatalog);
    }
    let mut seen = HashSet::new();
    for property in &properties {
      if !seen.insert(property.id.as_str()) {
        return Err(Error::DuplicateProperty(property.id.clone()));
      }
    }
    Ok(Self { properties })
  }

  /// Parse a catalog from a JSON array of properties.
  pub fn from_json(raw: &str) -> Result<Self> {
    Self::new(serde_json::from_str(raw)?)
  }

  pub fn all(&self) -> &[Property] { &self.properties }

  pub fn get(&self, id: &str) -> Option<&Property> {
    self.properties.iter().find(|p| p.id == id)
  }

  /// The first property in catalog order.
  pub fn first(&self) -> &Property {
    // Non-empty by construction.
    &self.properties[0]
  }

  /// The property's first image, or [`PLACEHOLDER_IMAGE`].
  pub fn first_image(&self, id: &str) -> &str {
    self
      .get(id)
      .and_then(|p| p.images.first())
      .map(String::as_str)
      .unwrap_or(PLACEHOLDER_IMAGE)
  }
}
