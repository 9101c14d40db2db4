//! API error types and response formatting.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Body text for any failure other than a missing credential.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Body text when the upstream API key is not configured.
pub const MISSING_CREDENTIAL: &str = "No Neynar API key found";

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No upstream API key configured. Checked before any upstream call.
    #[error("upstream credential missing")]
    MissingCredential,

    /// Feed assembly failed; no partial feed is returned.
    #[error("feed unavailable: {0}")]
    FeedUnavailable(#[from] clankfeed_core::Error),
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match &self {
            Self::MissingCredential => {
                tracing::warn!("{}", MISSING_CREDENTIAL);
                MISSING_CREDENTIAL
            }
            Self::FeedUnavailable(err) => {
                tracing::error!(error = %err, "Error fetching posts");
                INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
