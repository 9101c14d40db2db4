use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::curate::RelevanceRules;
use crate::models::Chain;
use crate::rank::DEFAULT_PAGE_SIZE;

/// Main configuration structure
///
/// Loaded from a TOML file, then environment variables layered on top.
/// Priority: Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub tip: TipConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is no file
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Overlay environment variables.
    ///
    /// The API key is not required here: a server without one still starts
    /// and reports the missing credential per request.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("NEYNAR_API_KEY").or_else(|| non_empty("NEXT_NEYNAR_API_KEY")) {
            self.upstream.api_key = Some(key);
        }
        if let Some(addr) = non_empty("CLANKFEED_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(url) = non_empty("CLANKFEED_RPC_URL") {
            self.tip.rpc_url = url;
        }
        if let Some(from) = non_empty("CLANKFEED_FROM_ADDRESS") {
            self.tip.from_address = Some(from);
        }
    }

    /// `<config dir>/clankfeed/config.toml`
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("clankfeed");

        Ok(config_dir.join("config.toml"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// fid of the tracked bot (Clanker)
    #[serde(default = "default_authority_fid")]
    pub authority_fid: u64,

    #[serde(default = "default_mention_token")]
    pub mention_token: String,

    #[serde(default = "default_action_keyword")]
    pub action_keyword: String,

    /// Results requested from each upstream query
    #[serde(default = "default_per_query_limit")]
    pub per_query_limit: u32,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_authority_fid() -> u64 {
    337685
}

fn default_mention_token() -> String {
    "@clanker".to_string()
}

fn default_action_keyword() -> String {
    "deploy".to_string()
}

fn default_per_query_limit() -> u32 {
    50
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl FeedConfig {
    pub fn relevance(&self) -> RelevanceRules {
        RelevanceRules::new(self.authority_fid, &self.mention_token, &self.action_keyword)
    }

    /// Query for casts mentioning the bot together with the action
    pub fn mention_query(&self) -> String {
        format!("{} {}", self.mention_token, self.action_keyword)
    }

    /// Query for the bot's own casts about the action
    pub fn authority_query(&self) -> String {
        format!("from:{} {}", self.authority_fid, self.action_keyword)
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            authority_fid: default_authority_fid(),
            mention_token: default_mention_token(),
            action_keyword: default_action_keyword(),
            per_query_limit: default_per_query_limit(),
            page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_neynar_url")]
    pub base_url: String,

    /// Neynar API key. Read from the environment, never written back to disk.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Retries per upstream query. 0 means one attempt.
    #[serde(default)]
    pub max_retries: u32,
}

fn default_neynar_url() -> String {
    "https://api.neynar.com/v2".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_neynar_url(),
            api_key: None,
            max_retries: 0,
        }
    }
}

/// 0.0001 ETH in wei
pub const DEFAULT_TIP_WEI: u64 = 100_000_000_000_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipConfig {
    #[serde(default = "default_tip_wei")]
    pub amount_wei: u64,

    #[serde(default)]
    pub chain: Chain,

    /// How long the success notification stays up
    #[serde(default = "default_success_dismiss_ms")]
    pub success_dismiss_ms: u64,

    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Sender account managed by the RPC endpoint
    #[serde(default)]
    pub from_address: Option<String>,

    #[serde(default = "default_confirm_timeout_secs")]
    pub confirm_timeout_secs: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_tip_wei() -> u64 {
    DEFAULT_TIP_WEI
}

fn default_success_dismiss_ms() -> u64 {
    2000
}

fn default_rpc_url() -> String {
    "https://sepolia.base.org".to_string()
}

fn default_confirm_timeout_secs() -> u64 {
    120
}

fn default_poll_interval_ms() -> u64 {
    2000
}

impl TipConfig {
    /// Amount in ETH for display, e.g. "0.0001 ETH"
    pub fn amount_display(&self) -> String {
        format_ether(self.amount_wei)
    }
}

impl Default for TipConfig {
    fn default() -> Self {
        Self {
            amount_wei: default_tip_wei(),
            chain: Chain::default(),
            success_dismiss_ms: default_success_dismiss_ms(),
            rpc_url: default_rpc_url(),
            from_address: None,
            confirm_timeout_secs: default_confirm_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

/// Wei to a trimmed decimal ETH string
pub fn format_ether(wei: u64) -> String {
    const WEI_PER_ETH: u64 = 1_000_000_000_000_000_000;
    let whole = wei / WEI_PER_ETH;
    let frac = wei % WEI_PER_ETH;

    if frac == 0 {
        return format!("{} ETH", whole);
    }

    let frac = format!("{:018}", frac);
    format!("{}.{} ETH", whole, frac.trim_end_matches('0'))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}
