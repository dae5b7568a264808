//! Unified error types for the OrdersFlow API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Store, aggregation and codec errors
//! - `SyncError`: Spreadsheet webhook client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required field is missing or invalid. `field` uses the wire name.
    #[error("Validation error: {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A mutation is blocked by an existing reference
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// Input text is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed JSON without the expected structure
    #[error("Unexpected payload shape: {0}")]
    Shape(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Spreadsheet webhook client errors
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The endpoint answered 2xx but reported a failure in its body
    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Remote sync is not configured")]
    NotConfigured,
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Remote sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::Validation { field, message }) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(format!("{}: {}", field, message)),
            ),
            AppError::Domain(DomainError::Constraint(msg)) => {
                (StatusCode::CONFLICT, "Constraint violated", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Parse(msg)) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Shape(msg)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid backup format",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Storage(msg)) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Sync(e) => {
                tracing::error!("Remote sync error: {}", e);
                match e {
                    SyncError::NotConfigured => (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Remote sync is not configured",
                        None,
                    ),
                    SyncError::Api { message, .. } | SyncError::Remote(message) => (
                        StatusCode::BAD_GATEWAY,
                        "Spreadsheet service error",
                        Some(message.clone()),
                    ),
                    SyncError::Request(_) => (
                        StatusCode::BAD_GATEWAY,
                        "Spreadsheet service unreachable",
                        None,
                    ),
                }
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
