// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::{AuthError, CoachError};
use crate::store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Coach(#[from] CoachError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code and HTTP status for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Auth(AuthError::InvalidCredentials) => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials")
            }
            AppError::Auth(AuthError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            AppError::Auth(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::Coach(CoachError::NoData) => (StatusCode::UNPROCESSABLE_ENTITY, "no_data"),
            AppError::Coach(CoachError::Busy) => (StatusCode::CONFLICT, "coach_busy"),
            AppError::Coach(CoachError::Stale) => (StatusCode::CONFLICT, "coach_stale"),
            AppError::Coach(CoachError::Unavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, "coach_unavailable")
            }
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();

        // User-facing messages go out as details; internals are only logged.
        let details = match &self {
            AppError::Unauthorized => None,
            AppError::BadRequest(msg) => Some(msg.clone()),
            AppError::Auth(AuthError::Storage(msg)) => {
                tracing::error!(error = %msg, "Session storage error");
                None
            }
            AppError::Auth(err) => Some(err.to_string()),
            AppError::Coach(err) => Some(err.to_string()),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                None
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
