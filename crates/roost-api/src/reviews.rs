//! Handlers for `/reviews` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/reviews` | Optional filter query, see [`ReviewQuery`] |
//! | `GET`  | `/reviews/stats` | Dashboard summary |
//! | `POST` | `/reviews/toggle-selection` | Body: `{"reviewId":123}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Query, State,
    rejection::{JsonRejection, QueryRejection},
  },
};
use chrono::NaiveDate;
use roost_core::{
  aggregate::ReviewService,
  filter::{ReviewFilter, SortOrder},
  review::{NormalizedReview, ReviewId},
  selection::SelectionStore,
  stats::DashboardSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
  envelope::{Envelope, ok},
  error::ApiError,
};

// ─── List ────────────────────────────────────────────────────────────────────

/// Query string of `GET /reviews`. Every parameter is optional; with none the
/// full list is returned newest first.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
  pub property_id: Option<String>,
  pub min_rating:  Option<f64>,
  pub max_rating:  Option<f64>,
  pub channel:     Option<String>,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  pub search:      Option<String>,
  pub sort_by:     Option<SortOrder>,
}

impl TryFrom<ReviewQuery> for ReviewFilter {
  type Error = ApiError;

  fn try_from(query: ReviewQuery) -> Result<Self, ApiError> {
    if let (Some(min), Some(max)) = (query.min_rating, query.max_rating)
      && min > max
    {
      return Err(ApiError::BadRequest(
        "minRating must not exceed maxRating".into(),
      ));
    }
    if let (Some(start), Some(end)) = (query.start_date, query.end_date)
      && start > end
    {
      return Err(ApiError::BadRequest(
        "startDate must not be after endDate".into(),
      ));
    }
    Ok(ReviewFilter {
      property_id: query.property_id,
      min_rating:  query.min_rating,
      max_rating:  query.max_rating,
      channel:     query.channel,
      start_date:  query.start_date,
      end_date:    query.end_date,
      search:      query.search,
      sort:        query.sort_by.unwrap_or_default(),
    })
  }
}

/// `GET /reviews[?propertyId=..&minRating=..&sortBy=..]`
pub async fn list<S: SelectionStore>(
  State(service): State<Arc<ReviewService<S>>>,
  query: Result<Query<ReviewQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<NormalizedReview>>>, ApiError> {
  let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let filter = ReviewFilter::try_from(query)?;
  Ok(ok(service.filtered_reviews(&filter).await))
}

// ─── Stats ───────────────────────────────────────────────────────────────────

/// `GET /reviews/stats`
pub async fn stats<S: SelectionStore>(
  State(service): State<Arc<ReviewService<S>>>,
) -> Json<Envelope<DashboardSummary>> {
  ok(service.summary().await)
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleOutcome {
  pub review_id:   ReviewId,
  pub is_selected: bool,
}

/// `POST /reviews/toggle-selection`: body: `{"reviewId":123}`
///
/// The body is taken as loose JSON so that a wrong `reviewId` type gets the
/// same envelope as a missing one.
pub async fn toggle_selection<S: SelectionStore>(
  State(service): State<Arc<ReviewService<S>>>,
  body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Envelope<ToggleOutcome>>, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let review_id = body
    .get("reviewId")
    .and_then(Value::as_i64)
    .ok_or_else(|| ApiError::BadRequest("Invalid review ID".into()))?;

  let is_selected = service
    .toggle_selection(review_id)
    .await
    .map_err(|e| ApiError::internal("Failed to toggle review selection", e))?;
  Ok(ok(ToggleOutcome {
    review_id,
    is_selected,
  }))
}
