//! Application state.

use std::sync::Arc;

use clankfeed_core::providers::NeynarProvider;
use clankfeed_core::{Config, FeedAssembler};

/// Shared application state available to all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Feed assembler, absent when no upstream API key is configured.
    pub feed: Option<Arc<FeedAssembler>>,
}

impl AppState {
    pub fn new(feed: Option<FeedAssembler>) -> Self {
        Self {
            feed: feed.map(Arc::new),
        }
    }

    /// Build state from configuration.
    ///
    /// A missing API key is logged, not fatal: the server still starts and
    /// `/api/posts` reports the missing credential per request.
    pub fn from_config(config: &Config) -> Self {
        let feed = match NeynarProvider::from_config(&config.upstream) {
            Some(provider) => Some(FeedAssembler::new(Arc::new(provider), config.feed.clone())),
            None => {
                tracing::warn!("No Neynar API key found; /api/posts will return errors");
                None
            }
        };

        Self::new(feed)
    }
}
