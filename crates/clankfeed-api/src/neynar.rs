use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use crate::models::{RawCast, SearchCastsResponse};
use crate::retry::{is_retryable_status, with_retry, RetryConfig, Retryable};

const NEYNAR_API_BASE: &str = "https://api.neynar.com/v2";

#[derive(Error, Debug)]
pub enum NeynarError {
    #[error("API request failed: Status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication required")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl NeynarError {
    /// True when the failure is about credentials rather than availability
    pub fn is_auth(&self) -> bool {
        matches!(self, NeynarError::AuthRequired)
    }
}

impl Retryable for NeynarError {
    fn is_retryable(&self) -> bool {
        match self {
            NeynarError::RequestFailed { status, .. } => is_retryable_status(*status),
            NeynarError::RateLimitExceeded | NeynarError::NetworkError(_) => true,
            NeynarError::AuthRequired | NeynarError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, NeynarError>;

/// Client for the Neynar Farcaster API
///
/// Only cast search is needed for the feed. One HTTP request per call unless
/// the caller opts into retries with [`NeynarClient::with_retry_config`].
pub struct NeynarClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    retry_config: RetryConfig,
}

impl NeynarClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, NEYNAR_API_BASE.to_string())
    }

    /// For a proxy or a local stand-in of the API
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("clankfeed/0.1.0"),
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry_config: RetryConfig::none(),
        }
    }

    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full-text search over casts.
    ///
    /// `query` accepts the Neynar search syntax, e.g. `from:337685 deploy`.
    pub async fn search_casts(&self, query: &str, limit: u32) -> Result<Vec<RawCast>> {
        let url = format!("{}/farcaster/cast/search", self.base_url);
        let limit = limit.to_string();

        with_retry(&self.retry_config, || async {
            let response = self
                .client
                .get(&url)
                .header("x-api-key", &self.api_key)
                .query(&[("q", query), ("limit", limit.as_str())])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(classify_failure(status, &body));
            }

            let body = response.text().await?;
            let parsed: SearchCastsResponse = serde_json::from_str(&body)?;
            debug!(query, count = parsed.result.casts.len(), "cast search returned");
            Ok(parsed.result.casts)
        })
        .await
    }
}

/// Map a non-success status to the matching error
fn classify_failure(status: StatusCode, body: &str) -> NeynarError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => NeynarError::AuthRequired,
        StatusCode::TOO_MANY_REQUESTS => NeynarError::RateLimitExceeded,
        _ => NeynarError::RequestFailed {
            status,
            body: body.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_failures() {
        assert!(classify_failure(StatusCode::UNAUTHORIZED, "").is_auth());
        assert!(classify_failure(StatusCode::FORBIDDEN, "bad key").is_auth());
    }

    #[test]
    fn test_classify_other_failures() {
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, ""),
            NeynarError::RateLimitExceeded
        ));

        let err = classify_failure(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(!err.is_auth());
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_only_transient_failures_are_retryable() {
        assert!(!classify_failure(StatusCode::UNAUTHORIZED, "").is_retryable());
        assert!(!classify_failure(StatusCode::FORBIDDEN, "").is_retryable());
        assert!(!classify_failure(StatusCode::NOT_FOUND, "").is_retryable());
        assert!(classify_failure(StatusCode::TOO_MANY_REQUESTS, "").is_retryable());
        assert!(classify_failure(StatusCode::SERVICE_UNAVAILABLE, "").is_retryable());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = NeynarClient::with_base_url("key".into(), "http://localhost:9999/v2/".into());
        assert_eq!(client.base_url(), "http://localhost:9999/v2");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Port 1 on loopback refuses connections
        let client = NeynarClient::with_base_url("key".into(), "http://127.0.0.1:1".into());
        let result = client.search_casts("@clanker deploy", 50).await;

        assert!(matches!(result, Err(NeynarError::NetworkError(_))));
    }
}
