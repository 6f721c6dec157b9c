//! # API Errors
//!
//! The single point where failures become HTTP statuses. Every error body is
//! `{ "message": ... }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::CatalogError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    #[error("Item not found")]
    NotFound,

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => ApiError::NotFound,
            CatalogError::InvalidPayload(msg) => ApiError::InvalidPayload(msg),
            CatalogError::Store(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidPayload(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item_store::StoreError;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InvalidPayload("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_body() {
        let body = ErrorResponse::from(&ApiError::NotFound);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "message": "Item not found" })
        );
    }

    #[test]
    fn test_catalog_error_mapping() {
        let err = ApiError::from(CatalogError::Store(StoreError::Missing("items.json".into())));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("items.json"));

        let err = ApiError::from(CatalogError::InvalidPayload("price".into()));
        assert_eq!(err.to_string(), "Invalid payload: price");
    }
}
