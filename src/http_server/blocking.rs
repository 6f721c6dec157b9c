//! Offloading catalog calls from the async runtime
//!
//! `CatalogService` reads and rewrites the store with `std::fs` and holds a
//! `std::sync::Mutex` across a create, so handlers run it on tokio's
//! blocking pool instead of a worker thread.

use tokio::task;

use super::errors::{ApiError, ApiResult};
use crate::catalog::CatalogResult;

/// Run `op` on the blocking pool and map its result into an API result
///
/// A panic inside `op` surfaces as an internal error.
pub async fn run_blocking<T, F>(op: F) -> ApiResult<T>
where
    F: FnOnce() -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(op)
        .await
        .map_err(|e| ApiError::Internal(format!("Catalog task failed: {}", e)))?
        .map_err(ApiError::from)
}
