//! Request logging middleware
//!
//! Tags every request with a fresh id (echoed as `x-request-id`), counts it
//! and logs one `HTTP_REQUEST` line once the response is ready.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_log(
    State(metrics): State<Arc<MetricsRegistry>>,
    request: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(request).await;

    metrics.increment_requests();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status().as_u16().to_string();
    let duration_ms = started.elapsed().as_millis().to_string();
    log_event_with_fields(
        Event::HttpRequest,
        &[
            ("duration_ms", duration_ms.as_str()),
            ("method", method.as_str()),
            ("path", path.as_str()),
            ("request_id", request_id.as_str()),
            ("status", status.as_str()),
        ],
    );

    response
}
