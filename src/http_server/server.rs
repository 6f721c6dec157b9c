//! # HTTP Server
//!
//! Combines the item, stats and observability routers into one axum app.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::items_routes::items_routes;
use super::observability_routes::{health_routes, observability_routes};
use super::request_log::request_log;
use super::stats_routes::stats_routes;
use crate::catalog::CatalogService;
use crate::observability::{log_event, log_event_with_fields, Event};

/// State shared by every handler
#[derive(Debug)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self { catalog }
    }
}

/// HTTP server for the catalog API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration
    pub fn new(catalog: Arc<CatalogService>) -> Self {
        Self::with_config(HttpServerConfig::default(), catalog)
    }

    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig, catalog: Arc<CatalogService>) -> Self {
        let router = build_router(&config, catalog);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event_with_fields(Event::ServerStart, &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ServerStop);
        Ok(())
    }
}

/// Build the combined router
pub fn build_router(config: &HttpServerConfig, catalog: Arc<CatalogService>) -> Router {
    let metrics = catalog.metrics();
    let state = Arc::new(AppState::new(catalog));

    Router::new()
        .merge(health_routes())
        .merge(items_routes(state.clone()))
        .merge(stats_routes(state.clone()))
        .nest("/observability", observability_routes(state))
        .layer(middleware::from_fn_with_state(metrics, request_log))
        .layer(cors_layer(config))
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    // If the handler cannot be installed, serve until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
