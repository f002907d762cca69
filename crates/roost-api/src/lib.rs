//! JSON REST API for Roost.
//!
//! Exposes an axum [`Router`] backed by a shared
//! [`ReviewService`](roost_core::aggregate::ReviewService). Every response,
//! success or failure, is wrapped in an [`Envelope`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roost_api::api_router(service.clone()))
//! ```

pub mod envelope;
pub mod error;
pub mod properties;
pub mod reviews;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use roost_core::{aggregate::ReviewService, selection::SelectionStore};

pub use envelope::Envelope;
pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<ReviewService<S>>) -> Router<()>
where
  S: SelectionStore + 'static,
{
  Router::new()
    // Properties
    .route("/properties", get(properties::list::<S>))
    .route("/property/{id}", get(properties::get_one::<S>))
    // Reviews
    .route("/reviews", get(reviews::list::<S>))
    .route("/reviews/stats", get(reviews::stats::<S>))
    .route("/reviews/toggle-selection", post(reviews::toggle_selection::<S>))
    .with_state(service)
}

#[cfg(test)]
mod tests;
