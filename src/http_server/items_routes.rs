//! Item HTTP Routes
//!
//! - `GET /api/items?q=&page=&pageSize=&limit=`
//! - `GET /api/items/:id`
//! - `POST /api/items`

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::blocking::run_blocking;
use super::errors::{ApiError, ApiResult};
use super::server::AppState;
use crate::catalog::{Item, ItemPage, ItemQuery};

/// Item routes with shared state
pub fn items_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/items", get(list_handler).post(create_handler))
        .route("/api/items/:id", get(get_handler))
        .with_state(state)
}

/// Query parameters never reject a listing: repeated keys keep their first
/// value and an undecodable query string lists as if it were empty.
async fn list_handler(
    State(state): State<Arc<AppState>>,
    params: Option<Query<Vec<(String, String)>>>,
) -> ApiResult<Json<ItemPage>> {
    let query = params
        .map(|Query(pairs)| ItemQuery::from_pairs(pairs))
        .unwrap_or_default();

    let catalog = state.catalog.clone();
    let page = run_blocking(move || catalog.list_items(&query)).await?;
    Ok(Json(page))
}

async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let catalog = state.catalog.clone();
    let item = run_blocking(move || catalog.get_item(&id)).await?;
    Ok(Json(item))
}

async fn create_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(body) = body.map_err(|rejection| {
        state.catalog.metrics().increment_invalid_payloads();
        ApiError::from(rejection)
    })?;

    let catalog = state.catalog.clone();
    let item = run_blocking(move || catalog.create_item(body)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}
