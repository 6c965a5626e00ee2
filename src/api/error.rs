//! Error taxonomy for HTTP handlers and its mapping to responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::db::{DbError, ValidationError};

/// Body returned for every non-2xx response from the todo handlers.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "todo with id 42 not found")]
    pub error: String,
}

/// Failure of a single request.
///
/// Client-caused variants echo their message; server-side variants log the
/// cause and return a generic body so storage internals do not leak.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad path parameter or failed validation.
    #[error("{0}")]
    InvalidArgument(String),

    /// Request body is not a well-formed todo payload.
    #[error("invalid input: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    /// Persistence or connectivity failure. Not retried.
    #[error("store error: {0}")]
    Store(#[source] DbError),

    /// A defect on our side, e.g. an entity that failed to serialize.
    #[error("internal error: {0}")]
    Internal(String),
}

const INTERNAL_MESSAGE: &str = "internal server error";

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) | ApiError::Decode(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client.
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Store(_) | ApiError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            other => ApiError::Store(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::InvalidArgument(format!("invalidArgument: {}", e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}
