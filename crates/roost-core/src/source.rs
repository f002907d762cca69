//! The `ReviewSource` trait implemented by upstream adapters.

use async_trait::async_trait;

use crate::provider::RawReview;

/// One upstream review provider.
///
/// `fetch_reviews` never fails to the caller. Missing credentials, transport
/// errors, non-success statuses and malformed payloads are logged by the
/// adapter and reported as an empty list, so one provider's outage cannot
/// affect another's contribution.
///
/// Object-safe so heterogeneous adapters can be held in one list.
#[async_trait]
pub trait ReviewSource: Send + Sync {
  /// Short name used in logs, e.g. `"hostaway"`.
  fn name(&self) -> &str;

  async fn fetch_reviews(&self) -> Vec<RawReview>;
}
