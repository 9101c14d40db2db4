// Farcaster channels the feed can be scoped to
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub id: &'static str,
    #[serde(rename = "name")]
    pub display_name: &'static str,
}

/// Known channels, in display order
pub static CHANNELS: &[Channel] = &[
    Channel { id: "farcaster", display_name: "Farcaster" },
    Channel { id: "base", display_name: "Base" },
    Channel { id: "warpcast", display_name: "Warpcast" },
    Channel { id: "dwr", display_name: "DWR" },
    Channel { id: "farcaster-news", display_name: "Farcaster News" },
    Channel { id: "farcaster-dev", display_name: "Farcaster Dev" },
    Channel { id: "farcaster-community", display_name: "Farcaster Community" },
    Channel { id: "farcaster-announcements", display_name: "Farcaster Announcements" },
    Channel { id: "farcaster-help", display_name: "Farcaster Help" },
    Channel { id: "farcaster-feedback", display_name: "Farcaster Feedback" },
    Channel { id: "farcaster-bugs", display_name: "Farcaster Bugs" },
    Channel { id: "farcaster-features", display_name: "Farcaster Features" },
    Channel { id: "farcaster-ideas", display_name: "Farcaster Ideas" },
    Channel { id: "farcaster-discussion", display_name: "Farcaster Discussion" },
    Channel { id: "farcaster-general", display_name: "Farcaster General" },
    Channel { id: "farcaster-offtopic", display_name: "Farcaster Offtopic" },
    Channel { id: "farcaster-memes", display_name: "Farcaster Memes" },
    Channel { id: "farcaster-art", display_name: "Farcaster Art" },
    Channel { id: "farcaster-music", display_name: "Farcaster Music" },
    Channel { id: "farcaster-gaming", display_name: "Farcaster Gaming" },
    Channel { id: "farcaster-tech", display_name: "Farcaster Tech" },
    Channel { id: "farcaster-crypto", display_name: "Farcaster Crypto" },
    Channel { id: "farcaster-defi", display_name: "Farcaster DeFi" },
    Channel { id: "farcaster-nft", display_name: "Farcaster NFT" },
    Channel { id: "farcaster-dao", display_name: "Farcaster DAO" },
    Channel { id: "farcaster-governance", display_name: "Farcaster Governance" },
    Channel { id: "farcaster-events", display_name: "Farcaster Events" },
    Channel { id: "farcaster-jobs", display_name: "Farcaster Jobs" },
    Channel { id: "farcaster-opportunities", display_name: "Farcaster Opportunities" },
    Channel { id: "farcaster-education", display_name: "Farcaster Education" },
    Channel { id: "farcaster-resources", display_name: "Farcaster Resources" },
    Channel { id: "farcaster-tools", display_name: "Farcaster Tools" },
    Channel { id: "farcaster-projects", display_name: "Farcaster Projects" },
    Channel { id: "farcaster-showcase", display_name: "Farcaster Showcase" },
    Channel { id: "farcaster-achievements", display_name: "Farcaster Achievements" },
    Channel { id: "farcaster-milestones", display_name: "Farcaster Milestones" },
    Channel { id: "farcaster-updates", display_name: "Farcaster Updates" },
    Channel { id: "farcaster-changes", display_name: "Farcaster Changes" },
    Channel { id: "farcaster-improvements", display_name: "Farcaster Improvements" },
    Channel { id: "farcaster-fixes", display_name: "Farcaster Fixes" },
    Channel { id: "farcaster-optimizations", display_name: "Farcaster Optimizations" },
    Channel { id: "farcaster-enhancements", display_name: "Farcaster Enhancements" },
    Channel { id: "farcaster-suggestions", display_name: "Farcaster Suggestions" },
    Channel { id: "farcaster-requests", display_name: "Farcaster Requests" },
    Channel { id: "farcaster-issues", display_name: "Farcaster Issues" },
    Channel { id: "farcaster-problems", display_name: "Farcaster Problems" },
    Channel { id: "farcaster-solutions", display_name: "Farcaster Solutions" },
    Channel { id: "farcaster-workarounds", display_name: "Farcaster Workarounds" },
    Channel { id: "farcaster-tips", display_name: "Farcaster Tips" },
    Channel { id: "farcaster-tricks", display_name: "Farcaster Tricks" },
    Channel { id: "farcaster-hacks", display_name: "Farcaster Hacks" },
    Channel { id: "farcaster-shortcuts", display_name: "Farcaster Shortcuts" },
    Channel { id: "farcaster-best-practices", display_name: "Farcaster Best Practices" },
    Channel { id: "farcaster-guidelines", display_name: "Farcaster Guidelines" },
    Channel { id: "farcaster-standards", display_name: "Farcaster Standards" },
    Channel { id: "farcaster-conventions", display_name: "Farcaster Conventions" },
    Channel { id: "farcaster-patterns", display_name: "Farcaster Patterns" },
    Channel { id: "farcaster-architecture", display_name: "Farcaster Architecture" },
    Channel { id: "farcaster-design", display_name: "Farcaster Design" },
    Channel { id: "farcaster-ux", display_name: "Farcaster UX" },
    Channel { id: "farcaster-ui", display_name: "Farcaster UI" },
    Channel { id: "farcaster-frontend", display_name: "Farcaster Frontend" },
    Channel { id: "farcaster-backend", display_name: "Farcaster Backend" },
    Channel { id: "farcaster-fullstack", display_name: "Farcaster Fullstack" },
    Channel { id: "farcaster-mobile", display_name: "Farcaster Mobile" },
    Channel { id: "farcaster-web", display_name: "Farcaster Web" },
    Channel { id: "farcaster-desktop", display_name: "Farcaster Desktop" },
    Channel { id: "farcaster-cli", display_name: "Farcaster CLI" },
    Channel { id: "farcaster-api", display_name: "Farcaster API" },
    Channel { id: "farcaster-sdk", display_name: "Farcaster SDK" },
    Channel { id: "farcaster-libraries", display_name: "Farcaster Libraries" },
    Channel { id: "farcaster-frameworks", display_name: "Farcaster Frameworks" },
    Channel { id: "farcaster-services", display_name: "Farcaster Services" },
    Channel { id: "farcaster-platforms", display_name: "Farcaster Platforms" },
    Channel { id: "farcaster-infrastructure", display_name: "Farcaster Infrastructure" },
    Channel { id: "farcaster-deployment", display_name: "Farcaster Deployment" },
    Channel { id: "farcaster-hosting", display_name: "Farcaster Hosting" },
    Channel { id: "farcaster-cloud", display_name: "Farcaster Cloud" },
    Channel { id: "farcaster-serverless", display_name: "Farcaster Serverless" },
    Channel { id: "farcaster-microservices", display_name: "Farcaster Microservices" },
    Channel { id: "farcaster-monolith", display_name: "Farcaster Monolith" },
    Channel { id: "farcaster-distributed", display_name: "Farcaster Distributed" },
    Channel { id: "farcaster-decentralized", display_name: "Farcaster Decentralized" },
    Channel { id: "farcaster-centralized", display_name: "Farcaster Centralized" },
    Channel { id: "farcaster-hybrid", display_name: "Farcaster Hybrid" },
];

pub fn all() -> &'static [Channel] {
    CHANNELS
}

/// Look up a channel by id, ignoring case and surrounding whitespace
pub fn find(id: &str) -> Option<&'static Channel> {
    let id = id.trim();
    CHANNELS.iter().find(|c| c.id.eq_ignore_ascii_case(id))
}
