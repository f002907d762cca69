//! Error type for `roost-sources`.
//!
//! These errors never leave an adapter: [`ReviewSource::fetch_reviews`]
//! logs them and reports an empty list instead.
//!
//! [`ReviewSource::fetch_reviews`]: roost_core::source::ReviewSource::fetch_reviews

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("credentials not configured")]
  MissingCredentials,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("upstream responded with {0}")]
  Status(reqwest::StatusCode),

  #[error("unexpected payload: {0}")]
  Payload(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
