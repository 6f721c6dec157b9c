//! Shared helpers for the HTTP-level tests
//!
//! Each test gets its own temp data directory seeded with the five-item
//! collection and a router built exactly as `catalogd serve` builds it.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use catalogd::catalog::{seed_items, CatalogService};
use catalogd::http_server::{build_router, HttpServerConfig};
use catalogd::item_store::{ItemStore, JsonFileStore};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    /// Keeps the data directory alive for the test's duration
    pub dir: TempDir,
    pub store_path: PathBuf,
    pub catalog: Arc<CatalogService>,
    pub router: Router,
}

impl TestApp {
    /// Send a request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(get(uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(post_json(uri, body)).await
    }
}

/// App over the seed collection
pub fn setup() -> TestApp {
    setup_with(|store| store.save(&seed_items()).unwrap())
}

/// App over a store prepared by `prepare`
pub fn setup_with(prepare: impl FnOnce(&JsonFileStore)) -> TestApp {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonFileStore::in_dir(dir.path());
    prepare(&store);

    let store_path = store.path().to_path_buf();
    let catalog = Arc::new(CatalogService::new(Arc::new(store)));
    let router = build_router(&HttpServerConfig::default(), catalog.clone());

    TestApp {
        dir,
        store_path,
        catalog,
        router,
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
