//! # HTTP Server Module
//!
//! JSON-over-HTTP surface of the catalog.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/items` - List (search, pagination, legacy limit) and create
//! - `/api/items/:id` - Single item lookup
//! - `/api/stats` - Cached count and average price
//! - `/observability/*` - Health and counters

pub mod blocking;
pub mod config;
pub mod errors;
pub mod items_routes;
pub mod observability_routes;
pub mod request_log;
pub mod server;
pub mod stats_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::{build_router, AppState, HttpServer};
