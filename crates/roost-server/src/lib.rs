//! Wiring for the Roost server: configuration, start-up assembly of the
//! review service, and the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use roost_core::{
  aggregate::ReviewService, catalog::PropertyCatalog, selection::SelectionStore,
};
use roost_sources::{
  FixtureSource, GoogleConfig, GoogleSource, HostawayConfig, HostawaySource,
};
use roost_store_file::{FileSelectionStore, SelectionMode};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// The catalog served when no `catalog_path` is configured.
pub const BUNDLED_CATALOG: &str = include_str!("../../../data/properties.json");

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration. Every field has a default, so an empty (or
/// absent) config file yields a runnable server with no upstream credentials.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  /// JSON array of properties; the bundled catalog when unset.
  pub catalog_path:         Option<PathBuf>,
  pub selections_path:      PathBuf,
  pub selection_mode:       SelectionMode,
  /// Hostaway-shaped sample reviews merged into every read when set.
  pub fixture_reviews_path: Option<PathBuf>,
  pub hostaway:             HostawayConfig,
  pub google:               GoogleConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 "127.0.0.1".to_owned(),
      port:                 3000,
      catalog_path:         None,
      selections_path:      PathBuf::from("data/review-selections.json"),
      selection_mode:       SelectionMode::Durable,
      fixture_reviews_path: None,
      hostaway:             HostawayConfig::default(),
      google:               GoogleConfig::default(),
    }
  }
}

/// `ROOST_`-prefixed environment variables; nested keys use `__`, e.g.
/// `ROOST_HOSTAWAY__API_KEY`.
pub fn environment() -> config::Environment {
  config::Environment::with_prefix("ROOST")
    .prefix_separator("_")
    .separator("__")
}

/// Layer `env` over the optional TOML file at `path`.
pub fn load_config(path: &Path, env: config::Environment) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(env)
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

// ─── Assembly ────────────────────────────────────────────────────────────────

pub async fn load_catalog(path: Option<&Path>) -> anyhow::Result<PropertyCatalog> {
  let Some(path) = path else {
    return PropertyCatalog::from_json(BUNDLED_CATALOG).context("bundled catalog is invalid");
  };
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read catalog at {path:?}"))?;
  PropertyCatalog::from_json(&raw).with_context(|| format!("invalid catalog at {path:?}"))
}

/// Build the review service described by `cfg`.
///
/// Unconfigured providers are still registered; they log and contribute
/// nothing on each read.
pub async fn build_service(
  cfg: &ServerConfig,
) -> anyhow::Result<Arc<ReviewService<FileSelectionStore>>> {
  let catalog = Arc::new(load_catalog(cfg.catalog_path.as_deref()).await?);
  let selections = FileSelectionStore::open(&cfg.selections_path, cfg.selection_mode).await;
  let client = roost_sources::http_client().context("failed to build http client")?;

  let hostaway = HostawaySource::new(client.clone(), cfg.hostaway.clone());
  if !hostaway.is_configured() {
    tracing::warn!("hostaway account id or api key missing; hostaway reviews disabled");
  }
  let google = GoogleSource::new(client, cfg.google.clone(), catalog.clone());
  if !google.is_configured() {
    tracing::warn!("google places api key missing; google reviews disabled");
  }

  let mut service = ReviewService::new(catalog.clone(), selections)
    .with_source(hostaway)
    .with_source(google);
  if let Some(path) = &cfg.fixture_reviews_path {
    service = service.with_source(FixtureSource::new(path));
  }

  tracing::info!(
    sources = ?service.source_names(),
    properties = catalog.all().len(),
    selections = %cfg.selections_path.display(),
    mode = ?cfg.selection_mode,
    "review service ready"
  );
  Ok(Arc::new(service))
}

/// The API nested under `/api`, with request tracing.
pub fn build_app<S>(service: Arc<ReviewService<S>>) -> Router
where
  S: SelectionStore + 'static,
{
  Router::new()
    .nest("/api", roost_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}
