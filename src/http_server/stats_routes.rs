//! Stats HTTP Routes
//!
//! `GET /api/stats` serves the cached aggregate, recomputing it after an
//! invalidation.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::blocking::run_blocking;
use super::errors::ApiResult;
use super::server::AppState;
use crate::catalog::StatsSnapshot;

/// Stats routes with shared state
pub fn stats_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/stats", get(stats_handler))
        .with_state(state)
}

async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<StatsSnapshot>> {
    let catalog = state.catalog.clone();
    let snapshot = run_blocking(move || catalog.stats()).await?;
    Ok(Json(StatsSnapshot::clone(&snapshot)))
}
