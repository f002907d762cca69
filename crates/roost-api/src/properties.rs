//! Handlers for property endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/properties` | Whole catalog |
//! | `GET`  | `/property/{id}` | Property plus its selected reviews; 404 if unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use roost_core::{
  aggregate::ReviewService,
  property::Property,
  review::NormalizedReview,
  selection::SelectionStore,
};
use serde::Serialize;

use crate::{
  envelope::{Envelope, ok},
  error::ApiError,
};

/// `GET /properties`
pub async fn list<S: SelectionStore>(
  State(service): State<Arc<ReviewService<S>>>,
) -> Json<Envelope<Vec<Property>>> {
  ok(service.catalog().all().to_vec())
}

#[derive(Debug, Serialize)]
pub struct PropertyPage {
  pub property: Property,
  /// Only the reviews selected for public display, newest first.
  pub reviews:  Vec<NormalizedReview>,
}

/// `GET /property/{id}`
pub async fn get_one<S: SelectionStore>(
  State(service): State<Arc<ReviewService<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Envelope<PropertyPage>>, ApiError> {
  let property = service
    .catalog()
    .get(&id)
    .cloned()
    .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;
  let reviews = service.selected_reviews_for_property(&id).await;
  Ok(ok(PropertyPage { property, reviews }))
}
