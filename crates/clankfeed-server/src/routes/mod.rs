//! API route definitions.

mod channels;
mod health;
mod posts;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `GET /health` - Health check
/// - `GET /api/posts` - Curated deployment feed (`?channelName=` is echoed as `channelId`)
/// - `GET /api/channels` - Known channels in display order
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/posts", get(posts::list_posts))
        .route("/channels", get(channels::list_channels));

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .with_state(state)
}
