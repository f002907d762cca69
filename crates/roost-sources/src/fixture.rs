//! Hostaway-shaped reviews read from a local JSON file.
//!
//! Stands in for the live Hostaway API in demos and sandboxes, where the
//! account has no reviews of its own.

use std::path::PathBuf;

use async_trait::async_trait;
use roost_core::{
  provider::{HostawayReview, RawReview},
  source::ReviewSource,
};

use crate::{Result, decode_each};

pub struct FixtureSource {
  path: PathBuf,
}

impl FixtureSource {
  /// `path` must hold a JSON array of Hostaway review records. It is read on
  /// every fetch.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  async fn try_fetch(&self) -> Result<Vec<HostawayReview>> {
    let raw = tokio::fs::read(&self.path).await?;
    let values: Vec<serde_json::Value> = serde_json::from_slice(&raw)?;
    Ok(decode_each(self.name(), values))
  }
}

#[async_trait]
impl ReviewSource for FixtureSource {
  fn name(&self) -> &str { "fixture" }

  async fn fetch_reviews(&self) -> Vec<RawReview> {
    match self.try_fetch().await {
      Ok(records) => records.into_iter().map(RawReview::Hostaway).collect(),
      Err(e) => {
        tracing::error!(path = %self.path.display(), error = %e, "fixture reviews unavailable");
        Vec::new()
      }
    }
  }
}
