use serde::{Deserialize, Serialize};

/// A cast as returned by the Neynar search endpoint.
///
/// Every field is optional on the wire: the search index occasionally hands
/// back partial casts, and deciding what is fatal belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCast {
    pub hash: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub embeds: Vec<RawEmbed>,
    pub timestamp: Option<String>,
    pub author: Option<RawAuthor>,
    pub reactions: Option<RawReactions>,
    pub replies: Option<RawReplies>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAuthor {
    pub fid: Option<u64>,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub pfp_url: Option<String>,
    #[serde(default)]
    pub power_badge: bool,
    pub custody_address: Option<String>,
    pub verified_addresses: Option<RawVerifiedAddresses>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawVerifiedAddresses {
    #[serde(default)]
    pub eth_addresses: Vec<String>,
    #[serde(default)]
    pub sol_addresses: Vec<String>,
}

/// Embeds are either links (url + metadata) or quoted casts (no url)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmbed {
    pub url: Option<String>,
    pub metadata: Option<RawEmbedMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmbedMetadata {
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReactions {
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub recasts_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReplies {
    #[serde(default)]
    pub count: u64,
}

/// Envelope of `GET /v2/farcaster/cast/search`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchCastsResponse {
    pub result: SearchCastsResult,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchCastsResult {
    #[serde(default)]
    pub casts: Vec<RawCast>,
}
