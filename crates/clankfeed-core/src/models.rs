use serde::{Deserialize, Serialize};

/// A curated cast, in the shape the feed UI consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Cast hash. Unique within one feed response.
    pub id: String,
    pub text: String,
    pub embeds: Vec<Embed>,
    /// ISO-8601, passed through exactly as the upstream sent it
    pub timestamp: String,
    pub author: Author,
    pub reactions: Reactions,
    pub replies: Replies,
}

impl Post {
    /// Where a tip for this post goes: the author's first verified address on `chain`
    pub fn tip_address(&self, chain: Chain) -> Option<&str> {
        self.author.verified_addresses.for_chain(chain).first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub fid: u64,
    pub username: String,
    pub display_name: String,
    pub pfp_url: Option<String>,
    /// Farcaster "power badge", the account verification flag
    pub power_badge: bool,
    pub custody_address: Option<String>,
    pub verified_addresses: VerifiedAddresses,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifiedAddresses {
    pub eth_addresses: Vec<String>,
    pub sol_addresses: Vec<String>,
}

impl VerifiedAddresses {
    pub fn for_chain(&self, chain: Chain) -> &[String] {
        match chain {
            Chain::Ethereum => &self.eth_addresses,
            Chain::Solana => &self.sol_addresses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    pub url: String,
    pub metadata: EmbedMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedMetadata {
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reactions {
    pub likes_count: u64,
    pub recasts_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replies {
    pub count: u64,
}

/// Payment network an address belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Any EVM chain; Base in practice
    #[default]
    Ethereum,
    Solana,
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Ethereum => write!(f, "Ethereum"),
            Chain::Solana => write!(f, "Solana"),
        }
    }
}

/// Body of `GET /api/posts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub posts: Vec<Post>,
    /// Pagination cursor. No state is carried between requests, so always null.
    pub next: Option<String>,
    #[serde(rename = "channelId", skip_serializing_if = "Option::is_none", default)]
    pub channel_id: Option<String>,
}

impl FeedResponse {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts,
            next: None,
            channel_id: None,
        }
    }
}
