//! HTTP error boundary
//!
//! Everything that leaves a handler as an error is an [`ApiError`], rendered
//! as `{ "status", "error", "detail" }`. Unavailability errors carry a
//! `Retry-After` hint.

use std::time::Duration;

use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::database::DatabaseError;
use crate::pagination::CursorError;
use crate::query::QueryEngineError;

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = 503)]
    pub status: u16,
    #[schema(example = "service_unavailable")]
    pub error: String,
    #[schema(example = "Database circuit breaker is open, service temporarily unavailable")]
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Rate limit exceeded")]
    TooManyRequests { retry_after: Duration },

    #[error("{detail}")]
    ServiceUnavailable {
        detail: String,
        retry_after: Option<Duration>,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &str, key: &str) -> Self {
        ApiError::NotFound(format!("{resource} {key} not found"))
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::NotFound(_) => "not_found",
            ApiError::TooManyRequests { .. } => "too_many_requests",
            ApiError::ServiceUnavailable { .. } => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ApiError::TooManyRequests { retry_after } => Some(*retry_after),
            ApiError::ServiceUnavailable { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        ErrorResponse {
            status: self.status_code().as_u16(),
            error: self.code().to_string(),
            detail: self.to_string(),
        }
    }
}

/// Whole seconds, rounded up and never below one
pub fn retry_after_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    secs.max(1)
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());

        if let Some(retry_after) = self.retry_after() {
            response.insert_header((
                header::RETRY_AFTER,
                HeaderValue::from(retry_after_secs(retry_after)),
            ));
        }

        response.json(self.body())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        let retry_after = error.retry_after();

        match error {
            DatabaseError::QueryError(_) => ApiError::Internal(error.to_string()),
            DatabaseError::CircuitOpen { .. }
            | DatabaseError::PoolExhausted { .. }
            | DatabaseError::ConnectionError(_) => ApiError::ServiceUnavailable {
                detail: error.to_string(),
                retry_after,
            },
        }
    }
}

impl From<CursorError> for ApiError {
    fn from(error: CursorError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<QueryEngineError> for ApiError {
    fn from(error: QueryEngineError) -> Self {
        match error {
            QueryEngineError::Database(error) => error.into(),
            QueryEngineError::Cursor(error) => error.into(),
            other @ (QueryEngineError::UnknownColumn { .. } | QueryEngineError::KeyArity { .. }) => {
                ApiError::BadRequest(other.to_string())
            }
        }
    }
}
