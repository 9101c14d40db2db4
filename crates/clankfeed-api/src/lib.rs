// Upstream clients: Neynar cast search and the wallet JSON-RPC transport
pub mod models;
pub mod neynar;
pub mod retry;
pub mod rpc;

// Re-export common types
pub use models::{
    RawAuthor, RawCast, RawEmbed, RawEmbedMetadata, RawReactions, RawReplies,
    RawVerifiedAddresses,
};
pub use neynar::{NeynarClient, NeynarError};
pub use retry::{is_retryable_status, RetryConfig, Retryable};
pub use rpc::{EthRpcClient, RpcError, TransactionReceipt};

pub use reqwest::StatusCode;
