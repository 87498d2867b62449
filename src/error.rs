//! Typed errors for request handling and the HTTP error boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::collections::BTreeMap;

use crate::api::envelope::Envelope;

pub const CREATE_BODY_INVALID: &str = "A string value for tasks is required in your JSON body";
pub const BODY_NOT_JSON: &str = "The request body must be valid JSON";
pub const ID_NOT_INTEGER: &str = "The id path parameter must be an integer";
pub const SIGNATURE_NOT_FOUND: &str = "Could not find a signature with that id identifier";
pub const TODO_NOT_FOUND: &str = "Could not find a todo with that id identifier";
pub const TASK_NOT_FOUND: &str = "Could not find a task with that id identifier";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error kinds for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidBody,
    InvalidId,
    NotFound,
    Store,
    Internal,
}

/// Error returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The body failed validation. `field` keys the message in the response.
    #[error("{message}")]
    InvalidBody {
        field: &'static str,
        message: &'static str,
    },

    #[error("id path parameter is not an integer: {raw:?}")]
    InvalidId { raw: String },

    #[error("{message}")]
    NotFound { message: &'static str },

    #[error("record store error: {0:#}")]
    Store(#[from] anyhow::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_body(field: &'static str, message: &'static str) -> Self {
        Self::InvalidBody { field, message }
    }

    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Self::InvalidId { raw: raw.into() }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::NotFound { message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::InvalidBody { .. } => ErrorKind::InvalidBody,
            ApiError::InvalidId { .. } => ErrorKind::InvalidId,
            ApiError::NotFound { .. } => ErrorKind::NotFound,
            ApiError::Store(_) => ErrorKind::Store,
            ApiError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidBody | ErrorKind::InvalidId => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Store | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the client. Server-side failures stay generic.
    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::InvalidBody { message, .. } => *message,
            ApiError::InvalidId { .. } => ID_NOT_INTEGER,
            ApiError::NotFound { message } => *message,
            ApiError::Store(_) | ApiError::Internal(_) => INTERNAL_MESSAGE,
        }
    }

    fn field(&self) -> &'static str {
        match self {
            ApiError::InvalidBody { field, .. } => *field,
            _ => "id",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self.kind() {
            ErrorKind::Store | ErrorKind::Internal => {
                tracing::error!(kind = ?self.kind(), error = %self, "Request failed");
                (status, Json(Envelope::error(INTERNAL_MESSAGE))).into_response()
            }
            _ => {
                tracing::debug!(kind = ?self.kind(), error = %self, "Request rejected");
                let data = BTreeMap::from([(self.field(), self.public_message())]);
                (status, Json(Envelope::fail(data))).into_response()
            }
        }
    }
}

/// Result type for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
