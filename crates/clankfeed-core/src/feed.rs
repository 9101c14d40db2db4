use std::sync::Arc;

use clankfeed_api::RawCast;
use tracing::{debug, error, info, warn};

use crate::config::FeedConfig;
use crate::curate::{curate, RelevanceRules};
use crate::models::{FeedResponse, Post};
use crate::normalize::normalize;
use crate::rank::rank;
use crate::Result;

/// Source of raw casts for a text query.
///
/// One outbound call per invocation. Implementations report
/// `Error::UpstreamUnavailable` or `Error::UpstreamAuth`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<RawCast>>;
}

/// Builds the curated feed: two concurrent searches, then curate, rank, normalize
pub struct FeedAssembler {
    provider: Arc<dyn SearchProvider>,
    config: FeedConfig,
    rules: RelevanceRules,
}

impl FeedAssembler {
    pub fn new(provider: Arc<dyn SearchProvider>, config: FeedConfig) -> Self {
        let rules = config.relevance();
        Self {
            provider,
            config,
            rules,
        }
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Assemble one feed page.
    ///
    /// Both searches must succeed; a failure in either yields
    /// `Error::FeedUnavailable` and no partial feed.
    pub async fn assemble(&self) -> Result<FeedResponse> {
        let mention_query = self.config.mention_query();
        let authority_query = self.config.authority_query();
        let limit = self.config.per_query_limit;

        debug!(%mention_query, %authority_query, limit, "Querying upstream");

        let (mentions, authority) = futures::future::try_join(
            self.provider.search(&mention_query, limit),
            self.provider.search(&authority_query, limit),
        )
        .await
        .map_err(|e| {
            error!("Feed assembly failed: {}", e);
            e.into_feed_unavailable()
        })?;

        let fetched = mentions.len() + authority.len();
        let posts = self.build(mentions, authority);

        info!(fetched, returned = posts.len(), "Assembled feed");
        Ok(FeedResponse::new(posts))
    }

    /// The synchronous part of assembly. Deterministic for given inputs.
    pub fn build(&self, primary: Vec<RawCast>, secondary: Vec<RawCast>) -> Vec<Post> {
        let curated = curate(primary, secondary, &self.rules);
        let ranked = rank(curated, self.config.page_size);

        ranked
            .into_iter()
            .filter_map(|cast| match normalize(cast) {
                Ok(post) => Some(post),
                Err(e) => {
                    warn!("Dropping cast from feed: {}", e);
                    None
                }
            })
            .collect()
    }
}
