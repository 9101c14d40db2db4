//! Feed endpoint.

use axum::extract::{Query, State};
use axum::Json;
use clankfeed_core::channels;
use clankfeed_core::FeedResponse;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostsQuery {
    /// Channel the client is viewing. Echoed back; does not scope the feed.
    #[serde(rename = "channelName")]
    pub channel_name: Option<String>,
}

/// `GET /api/posts`
///
/// Assembles the curated feed on every request. The credential check happens
/// before any upstream call; any assembly failure yields no partial feed.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<FeedResponse>, ApiError> {
    let feed = state.feed.as_ref().ok_or(ApiError::MissingCredential)?;

    let mut response = feed.assemble().await?;
    response.channel_id = params
        .channel_name
        .as_deref()
        .and_then(channels::find)
        .map(|channel| channel.id.to_string());

    Ok(Json(response))
}
