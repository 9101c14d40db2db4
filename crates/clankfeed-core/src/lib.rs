// Feed curation and tipping logic
pub mod channels;
pub mod config;
pub mod curate;
pub mod error;
pub mod feed;
pub mod models;
pub mod normalize;
pub mod providers;
pub mod rank;
pub mod tip;

pub use config::Config;
pub use curate::{curate, RelevanceRules};
pub use error::Error;
pub use feed::{FeedAssembler, SearchProvider};
pub use models::{Author, Chain, FeedResponse, Post};
pub use normalize::normalize;
pub use rank::rank;
pub use tip::{TipController, TipError, TipFailure, TipOutcome, TipState};

/// Result type alias for the feed side
pub type Result<T> = std::result::Result<T, Error>;
