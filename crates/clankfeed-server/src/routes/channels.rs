//! Channel table endpoint.

use axum::Json;
use clankfeed_core::channels::{self, Channel};

/// `GET /api/channels`
pub async fn list_channels() -> Json<&'static [Channel]> {
    Json(channels::all())
}
