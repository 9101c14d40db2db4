use thiserror::Error;

/// Everything that can go wrong while building the feed
///
/// Item-level variants (`MalformedItem`, `InvalidTimestamp`) are recovered by
/// dropping the item. Upstream variants abort the assembly and come back
/// wrapped in `FeedUnavailable`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream search unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream rejected credentials: {0}")]
    UpstreamAuth(String),

    #[error("Malformed item: {0}")]
    MalformedItem(String),

    #[error("Invalid timestamp {value:?} on item {id}")]
    InvalidTimestamp { id: String, value: String },

    #[error("Feed unavailable: {0}")]
    FeedUnavailable(Box<Error>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Wrap as `FeedUnavailable` unless already wrapped
    pub fn into_feed_unavailable(self) -> Self {
        match self {
            Error::FeedUnavailable(_) => self,
            other => Error::FeedUnavailable(Box::new(other)),
        }
    }

    /// The underlying cause for a `FeedUnavailable`, otherwise self
    pub fn root(&self) -> &Error {
        match self {
            Error::FeedUnavailable(inner) => inner.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_unavailable_wraps_once() {
        let err = Error::UpstreamAuth("401".into())
            .into_feed_unavailable()
            .into_feed_unavailable();

        match &err {
            Error::FeedUnavailable(inner) => {
                assert!(matches!(**inner, Error::UpstreamAuth(_)))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(err.root(), Error::UpstreamAuth(_)));
    }
}
