use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use company_core::error::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {message}")]
    NotFound { kind: &'static str, message: String },

    #[error("Bad request: {message}")]
    BadRequest { kind: &'static str, message: String },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn validation(message: String) -> Self {
        ApiError::BadRequest {
            kind: "ValidationError",
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let kind = err.kind();
        match err {
            DomainError::NotFound { message, .. } => ApiError::NotFound { kind, message },
            DomainError::DuplicateCode { message, .. }
            | DomainError::InvalidEmployeeCount { message }
            | DomainError::CannotUpdateDeleted { message, .. }
            | DomainError::AlreadyDeleted { message, .. }
            | DomainError::NotDeleted { message, .. } => ApiError::BadRequest { kind, message },
            DomainError::ConstraintViolation(detail) => ApiError::BadRequest {
                kind,
                message: detail,
            },
            DomainError::DatabaseError(detail) => ApiError::DatabaseError(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            kind: "BadRequest",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest {
            kind: "BadRequest",
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::NotFound { kind, message } => {
                tracing::warn!("Not found: {}", message);
                (kind, message)
            }
            ApiError::BadRequest { kind, message } => {
                tracing::warn!("Bad request ({}): {}", kind, message);
                (kind, message)
            }
            ApiError::DatabaseError(detail) => {
                // store detail stays in the logs
                tracing::error!("Database error: {}", detail);
                ("DatabaseError", "Internal server error".to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
