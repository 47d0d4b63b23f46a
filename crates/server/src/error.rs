use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use warden_common::api::ErrorResponse;

use crate::store::StoreError;
use crate::trigger::TriggerError;

/// Every failure a handler can surface. The body is always `{"error": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Conflict(String),
    UpstreamUnavailable(String),
    UpstreamError(String),
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::UpstreamUnavailable(_) | Self::UpstreamError(_) | Self::Decode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg)
            | Self::Conflict(msg)
            | Self::UpstreamUnavailable(msg)
            | Self::UpstreamError(msg)
            | Self::Decode(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let msg = e.to_string();
        match e {
            StoreError::Unavailable(_) => Self::UpstreamUnavailable(msg),
            StoreError::Upstream(_) => Self::UpstreamError(msg),
            StoreError::Conflict(_) => Self::Conflict(msg),
            StoreError::Decode(_) => Self::Decode(msg),
        }
    }
}

impl From<TriggerError> for ApiError {
    fn from(e: TriggerError) -> Self {
        let msg = e.to_string();
        match e {
            TriggerError::Unavailable(_) => Self::UpstreamUnavailable(msg),
            TriggerError::Upstream(_) => Self::UpstreamError(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
