// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent HTML responses.

use crate::services::render;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Why an activity could not be turned into a calorie figure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidActivityError {
    #[error("Unknown activity type: {0}")]
    UnknownKind(String),

    #[error("Missing value for {0}")]
    Missing(&'static str),

    #[error("Invalid value for {field}: {value}")]
    NotANumber { field: &'static str, value: String },

    #[error("Value for {field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing or blank field: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidActivity(#[from] InvalidActivityError),

    #[error("{0} NOT FOUND")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Request body not received in time")]
    RequestTimeout,

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(_) | AppError::InvalidActivity(_) | AppError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotFound(path) => (StatusCode::NOT_FOUND, format!("{} NOT FOUND", path)),
            AppError::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, self.to_string()),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        (status, Html(render::render_error_page(status, &detail))).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
