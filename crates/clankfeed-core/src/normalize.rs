// Raw Neynar casts -> feed posts
use clankfeed_api::{RawAuthor, RawCast};

use crate::models::{Author, Embed, EmbedMetadata, Post, Reactions, Replies, VerifiedAddresses};
use crate::{Error, Result};

/// Convert a raw cast into a [`Post`].
///
/// `hash`, `text`, `timestamp` and an author carrying `fid` and `username`
/// are required. Everything else falls back to an empty value. Embeds
/// without a URL (quoted casts) are skipped.
pub fn normalize(raw: RawCast) -> Result<Post> {
    let id = raw.hash.ok_or_else(|| Error::MalformedItem("cast without hash".into()))?;
    let text = raw
        .text
        .ok_or_else(|| Error::MalformedItem(format!("cast {} has no text", id)))?;
    let timestamp = raw
        .timestamp
        .ok_or_else(|| Error::MalformedItem(format!("cast {} has no timestamp", id)))?;
    let author = raw
        .author
        .ok_or_else(|| Error::MalformedItem(format!("cast {} has no author", id)))
        .and_then(|a| normalize_author(&id, a))?;

    let embeds = raw
        .embeds
        .into_iter()
        .filter_map(|embed| {
            let url = embed.url?;
            Some(Embed {
                url,
                metadata: EmbedMetadata {
                    content_type: embed.metadata.and_then(|m| m.content_type),
                },
            })
        })
        .collect();

    let reactions = raw
        .reactions
        .map(|r| Reactions {
            likes_count: r.likes_count,
            recasts_count: r.recasts_count,
        })
        .unwrap_or_default();

    let replies = raw
        .replies
        .map(|r| Replies { count: r.count })
        .unwrap_or_default();

    Ok(Post {
        id,
        text,
        embeds,
        timestamp,
        author,
        reactions,
        replies,
    })
}

fn normalize_author(cast_id: &str, raw: RawAuthor) -> Result<Author> {
    let fid = raw
        .fid
        .ok_or_else(|| Error::MalformedItem(format!("author of cast {} has no fid", cast_id)))?;
    let username = raw.username.ok_or_else(|| {
        Error::MalformedItem(format!("author of cast {} has no username", cast_id))
    })?;

    let verified_addresses = raw
        .verified_addresses
        .map(|v| VerifiedAddresses {
            eth_addresses: v.eth_addresses,
            sol_addresses: v.sol_addresses,
        })
        .unwrap_or_default();

    Ok(Author {
        fid,
        display_name: raw.display_name.unwrap_or_else(|| username.clone()),
        username,
        pfp_url: raw.pfp_url,
        power_badge: raw.power_badge,
        custody_address: raw.custody_address,
        verified_addresses,
    })
}
