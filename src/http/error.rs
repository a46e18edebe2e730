//! Translation of service failures into HTTP responses.

use crate::auth::AuthenticationError;
use crate::error::UserServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde::{Deserialize, Serialize};

/// Message returned for every server-side failure; details stay in the logs.
const GENERIC_SERVER_MESSAGE: &str = "The identity provider could not complete the request";

/// Error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] UserServiceError),

    /// Bearer token present but malformed or unknown.
    #[error("Authentication failed: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Request body is not a JSON object of the expected shape.
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

/// Body for every non-validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Service(e) => {
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::MalformedBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Field map, so clients can show each message next to its input
            ApiError::Service(UserServiceError::Validation(fields)) => {
                (status, Json(fields)).into_response()
            }
            ApiError::Service(e @ UserServiceError::Unknown(_)) => {
                error!("Request failed with {}: {}", status, e);
                let body = ErrorBody::new(status, e.error_code(), GENERIC_SERVER_MESSAGE);
                (status, Json(body)).into_response()
            }
            ApiError::Service(e) => {
                let body = ErrorBody::new(status, e.error_code(), e.to_string());
                (status, Json(body)).into_response()
            }
            ApiError::Authentication(e) => {
                let body = ErrorBody::new(status, "UNAUTHENTICATED", e.to_string());
                (status, Json(body)).into_response()
            }
            ApiError::MalformedBody(message) => {
                let body = ErrorBody::new(status, "MALFORMED_BODY", message);
                (status, Json(body)).into_response()
            }
        }
    }
}
