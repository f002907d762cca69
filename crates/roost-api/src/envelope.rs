//! The `{success, data?, error?}` wrapper every response is sent in.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error:   Option<String>,
}

impl<T> Envelope<T> {
  pub fn success(data: T) -> Self {
    Self {
      success: true,
      data:    Some(data),
      error:   None,
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      success: false,
      data:    None,
      error:   Some(message.into()),
    }
  }
}

/// Shorthand for a successful JSON response.
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> { Json(Envelope::success(data)) }
