// Neynar provider implementation - bridges the API client with SearchProvider
use async_trait::async_trait;
use clankfeed_api::{NeynarClient, NeynarError, RawCast, RetryConfig};

use crate::{config::UpstreamConfig, feed::SearchProvider, Error, Result};

/// Wrapper around NeynarClient that implements SearchProvider
pub struct NeynarProvider {
    client: NeynarClient,
}

impl NeynarProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: NeynarClient::new(api_key),
        }
    }

    /// Build from config. `None` when no API key is configured.
    pub fn from_config(config: &UpstreamConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        let retry = if config.max_retries == 0 {
            RetryConfig::none()
        } else {
            RetryConfig::with_max_retries(config.max_retries)
        };

        let client = NeynarClient::with_base_url(api_key, config.base_url.clone())
            .with_retry_config(retry);
        Some(Self { client })
    }
}

#[async_trait]
impl SearchProvider for NeynarProvider {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<RawCast>> {
        self.client
            .search_casts(query, limit)
            .await
            .map_err(upstream_error)
    }
}

fn upstream_error(err: NeynarError) -> Error {
    if err.is_auth() {
        Error::UpstreamAuth(err.to_string())
    } else {
        Error::UpstreamUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(upstream_error(NeynarError::AuthRequired), Error::UpstreamAuth(_)));
        assert!(matches!(
            upstream_error(NeynarError::RateLimitExceeded),
            Error::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            upstream_error(NeynarError::RequestFailed {
                status: clankfeed_api::StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }),
            Error::UpstreamUnavailable(_)
        ));
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = UpstreamConfig::default();
        assert!(NeynarProvider::from_config(&config).is_none());

        config.api_key = Some("key".into());
        assert!(NeynarProvider::from_config(&config).is_some());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_unavailable() {
        let config = UpstreamConfig {
            base_url: "http://127.0.0.1:1".into(),
            api_key: Some("key".into()),
            max_retries: 0,
        };
        let provider = NeynarProvider::from_config(&config).unwrap();

        let result = provider.search("@clanker deploy", 50).await;
        assert!(matches!(result, Err(Error::UpstreamUnavailable(_))));
    }
}
