//! Hostaway `GET /reviews` adapter.

use async_trait::async_trait;
use reqwest::{Client, header};
use roost_core::{
  provider::{HostawayEnvelope, HostawayReview, RawReview},
  source::ReviewSource,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, credential, decode_each};

pub const DEFAULT_BASE_URL: &str = "https://api.hostaway.com/v1";

fn default_base_url() -> String { DEFAULT_BASE_URL.to_owned() }

/// Connection settings for the Hostaway API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostawayConfig {
  #[serde(default = "default_base_url")]
  pub base_url:   String,
  #[serde(default)]
  pub account_id: Option<String>,
  #[serde(default)]
  pub api_key:    Option<String>,
}

impl Default for HostawayConfig {
  fn default() -> Self {
    Self {
      base_url:   default_base_url(),
      account_id: None,
      api_key:    None,
    }
  }
}

impl HostawayConfig {
  /// The API key, if both it and the account id are set.
  fn api_key(&self) -> Option<&str> {
    credential(&self.account_id)?;
    credential(&self.api_key)
  }
}

pub struct HostawaySource {
  client: Client,
  config: HostawayConfig,
}

impl HostawaySource {
  pub fn new(client: Client, config: HostawayConfig) -> Self { Self { client, config } }

  pub fn is_configured(&self) -> bool { self.config.api_key().is_some() }

  async fn try_fetch(&self) -> Result<Vec<HostawayReview>> {
    let api_key = self.config.api_key().ok_or(Error::MissingCredentials)?;
    let url = format!("{}/reviews", self.config.base_url.trim_end_matches('/'));

    let response = self
      .client
      .get(&url)
      .bearer_auth(api_key)
      .header(header::CONTENT_TYPE, "application/json")
      .send()
      .await?;
    if !response.status().is_success() {
      return Err(Error::Status(response.status()));
    }

    let envelope: HostawayEnvelope = response.json().await?;
    if envelope.status != "success" {
      return Err(Error::Payload(format!("status {:?}", envelope.status)));
    }
    match envelope.result {
      Some(serde_json::Value::Array(items)) => Ok(decode_each(self.name(), items)),
      _ => Err(Error::Payload("`result` is not an array".into())),
    }
  }
}

#[async_trait]
impl ReviewSource for HostawaySource {
  fn name(&self) -> &str { "hostaway" }

  async fn fetch_reviews(&self) -> Vec<RawReview> {
    match self.try_fetch().await {
      Ok(records) => records.into_iter().map(RawReview::Hostaway).collect(),
      Err(Error::MissingCredentials) => {
        tracing::warn!("hostaway credentials not configured, skipping");
        Vec::new()
      }
      Err(e) => {
        tracing::error!(error = %e, "hostaway fetch failed");
        Vec::new()
      }
    }
  }
}
