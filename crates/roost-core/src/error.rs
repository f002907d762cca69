//! Error types for `roost-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("property catalog is empty")]
  EmptyCatalog,

  #[error("duplicate property id in catalog: {0:?}")]
  DuplicateProperty(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
