//! `/api/items` over HTTP
//!
//! Mirrors what the catalog client relies on: listing, search, pagination,
//! the legacy `limit` path, single lookups and creation.

mod common;

use std::fs;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use catalogd::item_store::{ItemStore, JsonFileStore};
use serde_json::{json, Value};

use common::setup;

fn names(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_returns_all_items() {
    let app = setup();
    let (status, body) = app.get("/api/items").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["totalItems"], 5);
    assert_eq!(body["pagination"]["totalPages"], 1);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[tokio::test]
async fn test_limit_truncates() {
    let app = setup();
    let (status, body) = app.get("/api/items?limit=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Laptop Pro", "Noise Cancelling Headphones"]);
    assert_eq!(body["pagination"]["itemsPerPage"], 2);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_non_numeric_limit_returns_everything() {
    let app = setup();
    let (status, body) = app.get("/api/items?limit=many").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_zero_limit_returns_no_items() {
    let app = setup();
    let (status, body) = app.get("/api/items?limit=0").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["totalItems"], 0);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_repeated_search_key_uses_first_value() {
    let app = setup();
    let response = tower::ServiceExt::oneshot(
        app.router.clone(),
        common::get("/api/items?q=desk&q=chair"),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "application/json"
    );

    let (_, body) = app.get("/api/items?q=desk&q=chair").await;
    assert_eq!(names(&body), vec!["Standing Desk"]);
}

#[tokio::test]
async fn test_repeated_page_key_uses_first_value() {
    let app = setup();
    let (status, body) = app.get("/api/items?page=1&page=2&pageSize=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Laptop Pro", "Noise Cancelling Headphones"]);
    assert_eq!(body["pagination"]["currentPage"], 1);
}

#[tokio::test]
async fn test_search_by_name() {
    let app = setup();
    let (status, body) = app.get("/api/items?q=desk").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Standing Desk"]);
}

#[tokio::test]
async fn test_search_across_category() {
    let app = setup();
    let (_, body) = app.get("/api/items?q=ELECTRONICS").await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item["category"] == "Electronics"));
}

#[tokio::test]
async fn test_first_page() {
    let app = setup();
    let (status, body) = app.get("/api/items?page=1&pageSize=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "itemsPerPage": 2,
            "totalItems": 5,
            "totalPages": 3,
            "hasNextPage": true,
            "hasPrevPage": false
        })
    );
}

#[tokio::test]
async fn test_pages_cover_collection_once() {
    let app = setup();
    let mut seen = Vec::new();

    for page in 1..=3 {
        let (_, body) = app
            .get(&format!("/api/items?page={page}&pageSize=2"))
            .await;
        seen.extend(names(&body));
    }

    let (_, all) = app.get("/api/items").await;
    assert_eq!(seen, names(&all));
}

#[tokio::test]
async fn test_search_then_paginate() {
    let app = setup();
    let (_, body) = app.get("/api/items?q=electronics&page=2&pageSize=2").await;

    assert_eq!(names(&body), vec!["Ultra-Wide Monitor"]);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}

#[tokio::test]
async fn test_page_past_end_is_empty() {
    let app = setup();
    let (status, body) = app.get("/api/items?page=7&pageSize=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["items"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["currentPage"], 7);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[tokio::test]
async fn test_malformed_page_params_use_defaults() {
    let app = setup();
    let (status, body) = app.get("/api/items?page=abc&pageSize=-3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["itemsPerPage"], 10);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_list_fails_when_store_missing() {
    let app = setup();
    fs::remove_file(&app.store_path).unwrap();

    let (status, body) = app.get("/api/items").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_list_fails_when_store_corrupt() {
    let app = setup();
    fs::write(&app.store_path, "[{").unwrap();

    let (status, _) = app.get("/api/items").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Single item
// =============================================================================

#[tokio::test]
async fn test_get_by_id() {
    let app = setup();
    let (status, body) = app.get("/api/items/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Laptop Pro");
}

#[tokio::test]
async fn test_get_missing_id() {
    let app = setup();
    let (status, body) = app.get("/api/items/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item not found" }));
}

#[tokio::test]
async fn test_get_non_numeric_id() {
    let app = setup();
    let (status, body) = app.get("/api/items/laptop").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Item not found" }));
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_item() {
    let app = setup();
    let payload = json!({ "name": "Test Item", "category": "Test", "price": 123 });

    let (status, created) = app.post_json("/api/items", &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Test Item");
    assert!(created["id"].is_i64());

    let stored = JsonFileStore::new(app.store_path.clone()).load().unwrap();
    assert_eq!(stored.len(), 6);
    assert!(stored.iter().any(|item| item.name == "Test Item"));
}

#[tokio::test]
async fn test_create_then_fetch() {
    let app = setup();
    let payload = json!({ "name": "Desk Lamp", "category": "Lighting", "price": 49.5 });

    let (_, created) = app.post_json("/api/items", &payload).await;
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/items/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
    assert_eq!(fetched["name"], payload["name"]);
    assert_eq!(fetched["category"], payload["category"]);
    assert_eq!(fetched["price"].as_f64(), payload["price"].as_f64());
}

#[tokio::test]
async fn test_created_item_echoes_payload_exactly() {
    let app = setup();
    let payload = json!({ "name": "Test Item", "category": "Test", "price": 123 });

    let (status, created) = app.post_json("/api/items", &payload).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (_, fetched) = app.get(&format!("/api/items/{id}")).await;
    let mut expected = payload.clone();
    expected["id"] = json!(id);
    assert_eq!(fetched, expected);
}

#[tokio::test]
async fn test_create_rejects_bad_shape() {
    let app = setup();

    for payload in [
        json!({ "name": "No price", "category": "Test" }),
        json!({ "name": "", "category": "Test", "price": 1 }),
        json!({ "name": "Cheap", "category": "Test", "price": -1 }),
        json!({ "id": 1, "name": "Dup", "category": "Test", "price": 1 }),
        json!(["not", "an", "object"]),
    ] {
        let (status, body) = app.post_json("/api/items", &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {payload}");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid payload"));
    }

    let stored = JsonFileStore::new(app.store_path.clone()).load().unwrap();
    assert_eq!(stored.len(), 5);
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let app = setup();
    let request = Request::builder()
        .method("POST")
        .uri("/api/items")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ \"name\": "))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_requires_json_content_type() {
    let app = setup();
    let request = Request::builder()
        .method("POST")
        .uri("/api/items")
        .body(Body::from(r#"{"name":"x","category":"y","price":1}"#))
        .unwrap();

    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Ambient surface
// =============================================================================

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup();
    let response = tower::ServiceExt::oneshot(app.router.clone(), common::get("/api/items"))
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_health() {
    let app = setup();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_metrics_count_requests() {
    let app = setup();
    app.get("/api/items").await;
    app.get("/api/items/999").await;

    let (status, body) = app.get("/observability/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests_served"], 2);
    assert_eq!(body["items_listed"], 5);
    assert_eq!(body["lookups_not_found"], 1);
}
