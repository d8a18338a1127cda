//! API error handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::error::RelayError;
use relay_core::types::ConsumerIdentity;

use crate::dto::{ErrorBody, ErrorResponse};

/// Error code of a PUT for a consumer that is already registered.
pub(crate) const ALREADY_REGISTERED: &str = "ALREADY_REGISTERED";

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: String,
    consumer: Option<ConsumerIdentity>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: code.into(),
            consumer: None,
        }
    }

    /// Attaches the consumer the request resolved to.
    pub fn with_consumer(mut self, consumer: ConsumerIdentity) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Returns the HTTP status of this error.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                consumer: self.consumer,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        match &err {
            RelayError::UnsupportedPath(_) => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "UNSUPPORTED_PATH")
            }
            RelayError::UnsupportedMethod(_) => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "UNSUPPORTED_METHOD")
            }
            RelayError::InvalidPort(_) => ApiError::bad_request(err.to_string()),
            RelayError::AlreadyRegistered(consumer) => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), ALREADY_REGISTERED)
                    .with_consumer(*consumer)
            }
            RelayError::NotRegistered(consumer) => {
                ApiError::new(StatusCode::NOT_FOUND, err.to_string(), "NOT_REGISTERED")
                    .with_consumer(*consumer)
            }
            _ => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}
