//! Upstream review adapters for Roost.
//!
//! Each adapter implements [`roost_core::source::ReviewSource`] and contains
//! its own failures: a misconfigured or unreachable provider contributes zero
//! reviews and a log line, nothing more.
//!
//! | Adapter | Upstream | Gate |
//! |---------|----------|------|
//! | [`HostawaySource`] | Hostaway `GET /reviews` | account id + API key |
//! | [`GoogleSource`] | Google Place Details, per linked property | API key |
//! | [`FixtureSource`] | local JSON file of Hostaway-shaped records | file path |

pub mod error;
pub mod fixture;
pub mod google;
pub mod hostaway;

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;

pub use error::{Error, Result};
pub use fixture::FixtureSource;
pub use google::{GoogleConfig, GoogleSource};
pub use hostaway::{HostawayConfig, HostawaySource};

const USER_AGENT: &str = concat!("roost/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by all adapters.
///
/// Only connection establishment is bounded; a slow upstream response is
/// waited out.
pub fn http_client() -> Result<Client> {
  Ok(
    Client::builder()
      .user_agent(USER_AGENT)
      .connect_timeout(Duration::from_secs(10))
      .build()?,
  )
}

/// A configured credential, treating blank strings as absent.
pub(crate) fn credential(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Decode each element on its own, dropping (and logging) the ones that do
/// not match `T`.
pub(crate) fn decode_each<T: DeserializeOwned>(
  source: &str,
  values: Vec<serde_json::Value>,
) -> Vec<T> {
  values
    .into_iter()
    .enumerate()
    .filter_map(|(index, value)| match serde_json::from_value(value) {
      Ok(record) => Some(record),
      Err(e) => {
        tracing::warn!(source, index, error = %e, "dropping malformed review record");
        None
      }
    })
    .collect()
}
