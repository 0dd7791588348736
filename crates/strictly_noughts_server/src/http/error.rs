//! Mapping of failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::http::dto::ErrorBody;
use crate::service::ServiceError;

/// Failure returned by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    reason: String,
}

impl ApiError {
    /// 400 with the given reason.
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            reason: reason.into(),
        }
    }

    /// 500 with a generic reason.
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            reason: "internal error".to_string(),
        }
    }

    /// Status code to send.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Reason to send.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::BadRequest(reason) => Self::bad_request(reason),
            ServiceError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                reason: "not found".to_string(),
            },
            ServiceError::Internal(detail) => {
                error!(detail = %detail, "Request failed");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { reason: self.reason })).into_response()
    }
}
