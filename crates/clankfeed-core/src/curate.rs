// Merge, de-duplicate and relevance-filter the two search result sets
use std::collections::HashSet;

use clankfeed_api::RawCast;
use tracing::debug;

/// What makes a cast relevant to the tracked bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceRules {
    /// fid of the bot account; its own posts only need the action keyword
    pub authority_fid: u64,
    /// Mention that references the bot, e.g. "@clanker"
    pub mention_token: String,
    /// The tracked action, e.g. "deploy"
    pub action_keyword: String,
}

impl RelevanceRules {
    pub fn new(authority_fid: u64, mention_token: &str, action_keyword: &str) -> Self {
        Self {
            authority_fid,
            mention_token: mention_token.to_lowercase(),
            action_keyword: action_keyword.to_lowercase(),
        }
    }

    /// Substring matching only, case-insensitive.
    ///
    /// The authority's own casts qualify on the action keyword alone;
    /// anyone else needs both the mention and the keyword.
    pub fn is_relevant(&self, cast: &RawCast) -> bool {
        let text = match cast.text.as_deref() {
            Some(text) => text.to_lowercase(),
            None => return false,
        };

        let mentions_action = text.contains(&self.action_keyword);
        if !mentions_action {
            return false;
        }

        let from_authority = cast
            .author
            .as_ref()
            .and_then(|a| a.fid)
            .is_some_and(|fid| fid == self.authority_fid);

        from_authority || text.contains(&self.mention_token)
    }
}

/// Concatenate `primary` then `secondary`, keep the first cast seen for each
/// hash, and drop anything the rules reject. Casts without a hash cannot be
/// de-duplicated and are dropped.
pub fn curate(primary: Vec<RawCast>, secondary: Vec<RawCast>, rules: &RelevanceRules) -> Vec<RawCast> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for cast in primary.into_iter().chain(secondary) {
        let Some(hash) = cast.hash.clone() else {
            debug!("Dropping cast without hash");
            continue;
        };

        if !seen.insert(hash) {
            continue;
        }

        if rules.is_relevant(&cast) {
            kept.push(cast);
        }
    }

    kept
}
