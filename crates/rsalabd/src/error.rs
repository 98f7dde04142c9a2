//! Mapping from service errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rsalab_core::types::ApiEnvelope;
use rsalab_core::RsaLabError;

/// Error returned by handlers; always rendered as a failed [`ApiEnvelope`].
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub RsaLabError);

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError(RsaLabError::InvalidParameter(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        match &self.0 {
            RsaLabError::InvalidParameter(_)
            | RsaLabError::Encoding(_)
            | RsaLabError::KeyUnavailable(_) => StatusCode::BAD_REQUEST,
            RsaLabError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RsaLabError::NotFound(_) => StatusCode::NOT_FOUND,
            RsaLabError::Crypto(_)
            | RsaLabError::Storage(_)
            | RsaLabError::Config(_)
            | RsaLabError::Io(_)
            | RsaLabError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_client_error() {
            tracing::debug!(kind = self.0.kind(), "request rejected: {}", self.0);
        } else {
            tracing::error!(kind = self.0.kind(), "request failed: {}", self.0);
        }
        (status, Json(ApiEnvelope::<()>::err(self.0.to_string()))).into_response()
    }
}
