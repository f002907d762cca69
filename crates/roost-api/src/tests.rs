//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
  response::Response,
};
use roost_core::{
  aggregate::ReviewService,
  catalog::PropertyCatalog,
  provider::{HostawayCategory, HostawayReview, RawReview},
  review::ReviewId,
  selection::{SelectionSet, SelectionStore},
  source::ReviewSource,
};
use roost_store_file::FileSelectionStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

// ─── Fixtures ────────────────────────────────────────────────────────────────

const CATALOG: &str = r#"[
  {
    "id": "1", "name": "Shoreditch Heights", "location": "Shoreditch, London",
    "bedrooms": 2, "bathrooms": 1, "maxGuests": 4, "pricePerNight": 180,
    "images": ["https://img.example/1.jpg"], "amenities": ["WiFi"],
    "averageRating": 4.8, "totalReviews": 24, "listingFragment": "Shoreditch Heights"
  },
  {
    "id": "2", "name": "Canary Wharf Tower", "location": "Canary Wharf, London",
    "bedrooms": 1, "bathrooms": 1, "maxGuests": 2, "pricePerNight": 150,
    "images": [], "amenities": [],
    "averageRating": 4.6, "totalReviews": 18, "listingFragment": "Canary Wharf"
  }
]"#;

struct StaticSource(Vec<RawReview>);

#[async_trait]
impl ReviewSource for StaticSource {
  fn name(&self) -> &str { "static" }

  async fn fetch_reviews(&self) -> Vec<RawReview> { self.0.clone() }
}

/// A store whose writes always fail.
struct ReadOnlyStore;

impl SelectionStore for ReadOnlyStore {
  type Error = std::io::Error;

  async fn selected_ids(&self) -> SelectionSet { SelectionSet::new() }

  async fn toggle(&self, _review_id: ReviewId) -> Result<bool, std::io::Error> {
    Err(std::io::Error::other("disk full"))
  }
}

fn hostaway(id: i64, listing: &str, rating: Option<f64>, submitted_at: &str) -> RawReview {
  RawReview::Hostaway(HostawayReview {
    id,
    kind: "guest-to-host".into(),
    status: "published".into(),
    rating,
    public_review: Some(format!("Review number {id}")),
    review_category: Some(vec![HostawayCategory {
      category: "cleanliness".into(),
      rating:   10.0,
    }]),
    submitted_at: submitted_at.into(),
    guest_name: "Shane Finkelstein".into(),
    listing_name: listing.into(),
    channel: None,
  })
}

fn reviews() -> Vec<RawReview> {
  let mut uncategorised =
    hostaway(7455, "2B N1 A - 29 Shoreditch Heights", Some(8.0), "2024-07-01 12:00:00");
  if let RawReview::Hostaway(review) = &mut uncategorised {
    review.review_category = None;
  }
  vec![
    hostaway(7453, "2B N1 A - 29 Shoreditch Heights", None, "2024-08-21 22:45:14"),
    hostaway(7454, "Studio - Canary Wharf Tower", Some(6.0), "2024-09-01 09:00:00"),
    uncategorised,
  ]
}

fn catalog() -> Arc<PropertyCatalog> { Arc::new(PropertyCatalog::from_json(CATALOG).unwrap()) }

fn app_with<S: SelectionStore + 'static>(store: S) -> Router {
  let service = ReviewService::new(catalog(), store).with_source(StaticSource(reviews()));
  api_router(Arc::new(service))
}

fn app() -> (Router, FileSelectionStore) {
  let store = FileSelectionStore::in_memory(SelectionSet::new());
  (app_with(store.clone()), store)
}

async fn body_json(response: Response) -> Value {
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
  let request = Request::get(uri).body(Body::empty()).unwrap();
  let response = app.oneshot(request).await.unwrap();
  (response.status(), body_json(response).await)
}

async fn toggle(app: Router, body: &str) -> (StatusCode, Value) {
  let request = Request::post("/reviews/toggle-selection")
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_owned()))
    .unwrap();
  let response = app.oneshot(request).await.unwrap();
  (response.status(), body_json(response).await)
}

fn ids(data: &Value) -> Vec<i64> {
  data
    .as_array()
    .unwrap()
    .iter()
    .map(|r| r["id"].as_i64().unwrap())
    .collect()
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_properties() {
  let (app, _) = app();
  let (status, body) = get(app, "/properties").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["success"], true);
  assert!(body.get("error").is_none());
  assert_eq!(body["data"].as_array().unwrap().len(), 2);
  assert_eq!(body["data"][0]["maxGuests"], 4);
}

#[tokio::test]
async fn unknown_property_is_404() {
  let (app, _) = app();
  let (status, body) = get(app, "/property/999").await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(
    body,
    json!({ "success": false, "error": "Property not found" })
  );
}

#[tokio::test]
async fn property_page_shows_only_selected_reviews() {
  let (app, store) = app();
  let (_, body) = get(app.clone(), "/property/1").await;
  assert_eq!(body["data"]["property"]["name"], "Shoreditch Heights");
  assert!(body["data"]["reviews"].as_array().unwrap().is_empty());

  store.toggle(7455).await.unwrap();
  store.toggle(7454).await.unwrap();

  let (status, body) = get(app, "/property/1").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&body["data"]["reviews"]), vec![7455]);
  assert_eq!(body["data"]["reviews"][0]["isSelected"], true);
}

// ─── Reviews ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lists_normalized_reviews_newest_first() {
  let (app, _) = app();
  let (status, body) = get(app, "/reviews").await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(ids(&body["data"]), vec![7454, 7453, 7455]);

  let review = &body["data"][1];
  assert_eq!(review["propertyId"], "1");
  assert_eq!(review["guestName"], "Shane F.");
  assert_eq!(review["guestFirstName"], "Shane");
  assert_eq!(review["rating"], 10.0);
  assert_eq!(review["channel"], "Airbnb");
  assert_eq!(review["type"], "guest-to-host");
  assert_eq!(review["dateFormatted"], "August 21, 2024");
  assert_eq!(review["isSelected"], false);
}

#[tokio::test]
async fn filters_and_sorts_reviews() {
  let (app, _) = app();
  let (_, body) = get(app.clone(), "/reviews?propertyId=1&sortBy=rating-asc").await;
  assert_eq!(ids(&body["data"]), vec![7455, 7453]);

  let (_, body) = get(app.clone(), "/reviews?propertyId=all&minRating=7&maxRating=9").await;
  assert_eq!(ids(&body["data"]), vec![7455]);

  let (_, body) = get(app, "/reviews?startDate=2024-08-01&endDate=2024-08-31").await;
  assert_eq!(ids(&body["data"]), vec![7453]);
}

#[tokio::test]
async fn malformed_query_is_400() {
  let (app, _) = app();
  let (status, body) = get(app.clone(), "/reviews?minRating=high").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);

  let (status, _) = get(app.clone(), "/reviews?sortBy=sideways").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, body) = get(app, "/reviews?minRating=9&maxRating=2").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["error"], "minRating must not exceed maxRating");
}

#[tokio::test]
async fn stats_summarise_reviews() {
  let (app, store) = app();
  store.toggle(7453).await.unwrap();

  let (status, body) = get(app, "/reviews/stats").await;
  assert_eq!(status, StatusCode::OK);
  let data = &body["data"];
  assert_eq!(data["totalReviews"], 3);
  assert_eq!(data["selectedReviews"], 1);
  assert_eq!(data["averageRating"], 8.0);
  assert_eq!(data["propertyStats"][0]["propertyId"], "2");
  assert_eq!(data["propertyStats"][1]["totalReviews"], 2);
  assert_eq!(data["propertyStats"][0]["categoryAverages"]["cleanliness"], 10.0);
  assert_eq!(data["propertyStats"][1]["categoryAverages"]["cleanliness"], 5.0);
}

// ─── Toggle ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_flips_and_reports_state() {
  let (app, store) = app();
  let (status, body) = toggle(app.clone(), r#"{"reviewId": 7453}"#).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(
    body,
    json!({ "success": true, "data": { "reviewId": 7453, "isSelected": true } })
  );
  assert!(store.is_selected(7453).await);

  let (_, body) = toggle(app, r#"{"reviewId": 7453}"#).await;
  assert_eq!(body["data"]["isSelected"], false);
  assert!(!store.is_selected(7453).await);
}

#[tokio::test]
async fn toggle_with_non_integer_id_is_400_without_mutation() {
  let (app, store) = app();
  for body in [r#"{"reviewId": "abc"}"#, r#"{"reviewId": 1.5}"#, r#"{}"#, "[]"] {
    let (status, response) = toggle(app.clone(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
    assert_eq!(
      response,
      json!({ "success": false, "error": "Invalid review ID" })
    );
  }
  assert!(store.selected_ids().await.is_empty());
}

#[tokio::test]
async fn toggle_with_malformed_json_is_400() {
  let (app, store) = app();
  let (status, body) = toggle(app, "{reviewId:").await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(body["success"], false);
  assert!(store.selected_ids().await.is_empty());
}

#[tokio::test]
async fn failed_persist_is_500_with_generic_message() {
  let app = app_with(ReadOnlyStore);
  let (status, body) = toggle(app, r#"{"reviewId": 1}"#).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(
    body,
    json!({ "success": false, "error": "Failed to toggle review selection" })
  );
}
