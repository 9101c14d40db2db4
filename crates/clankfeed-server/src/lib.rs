//! HTTP API for the clanker deployment feed.
//!
//! Serves the curated feed at `GET /api/posts`, the channel table at
//! `GET /api/channels`, and a health probe at `GET /health`.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
