//! # API Error Handling
//!
//! Every failure a handler can produce ends up as an [`ApiError`], which
//! renders as a status code plus a `{"description": "..."}` body.
//!
//! ## Status Mapping
//! ```text
//! ┌──────────────────────────┬────────┬──────────────────────────────────┐
//! │ Source                   │ Status │ Description                      │
//! ├──────────────────────────┼────────┼──────────────────────────────────┤
//! │ unparseable id / price   │  400   │ request-specific message         │
//! │ malformed JSON body      │  400   │ extractor rejection text         │
//! │ ValidationError          │  400   │ "Discount should be between..."  │
//! │ DbError::NotFound        │  404   │ "Product with id N not found"    │
//! │ other DbError, on write  │  400   │ "Database operation failed"      │
//! │ other DbError, on read   │  500   │ "Database operation failed"      │
//! └──────────────────────────┴────────┴──────────────────────────────────┘
//! ```
//!
//! Persistence details never reach the client; they are logged instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use product_core::ValidationError;
use product_db::DbError;
use serde::{Deserialize, Serialize};

use crate::services::ServiceError;

/// Error body returned to HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub description: String,
}

/// API error returned by handlers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Machine-readable category, decides the status code
    pub code: ErrorCode,

    /// Message sent to the client
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed request parameters or body (400)
    BadRequest,

    /// Business rule rejected the input (400)
    ValidationError,

    /// Resource not found (404)
    NotFound,

    /// Persistence failure while reading (500)
    DatabaseError,

    /// Persistence failure while creating, updating or deleting (400)
    WriteFailed,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest | ErrorCode::ValidationError | ErrorCode::WriteFailed => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Converts the failure of a POST, PUT or DELETE.
    ///
    /// Persistence failures on writes are client-facing 400s. Not-found and
    /// validation keep their own codes.
    pub fn from_write(err: impl Into<ApiError>) -> Self {
        let mut err = err.into();
        if err.code == ErrorCode::DatabaseError {
            err.code = ErrorCode::WriteFailed;
        }
        err
    }

    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            other => {
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => e.into(),
            ServiceError::Repository(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            description: self.message,
        };
        (self.code.status(), Json(body)).into_response()
    }
}
