// Minimal Ethereum JSON-RPC transport for tip transfers
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

use crate::retry::{is_retryable_status, Retryable};

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("RPC endpoint returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("RPC response carried neither result nor error")]
    MissingResult,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// EIP-1193 code for "user rejected the request"
pub const USER_REJECTED: i64 = 4001;

/// EIP-1474 code for "request exceeds defined limit"
pub const LIMIT_EXCEEDED: i64 = -32005;

/// Some hosted nodes report throttling with the HTTP status as the RPC code
const THROTTLED: i64 = 429;

impl Retryable for RpcError {
    /// Failures that say nothing about the transaction itself
    fn is_retryable(&self) -> bool {
        match self {
            RpcError::NetworkError(_) => true,
            RpcError::Http { status, .. } => is_retryable_status(*status),
            RpcError::Rpc { code, .. } => *code == LIMIT_EXCEEDED || *code == THROTTLED,
            RpcError::MissingResult | RpcError::ParseError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, RpcError>;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// Subset of a transaction receipt the tip flow cares about
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    /// "0x1" success, "0x0" reverted
    pub status: Option<String>,
    pub block_number: Option<String>,
}

impl TransactionReceipt {
    /// Only an explicit "0x0" is a revert. Receipts without a status field
    /// (pre-Byzantium, some L2 nodes) exist only for included transactions.
    pub fn reverted(&self) -> bool {
        self.status.as_deref() == Some("0x0")
    }
}

/// JSON-RPC client against a node or wallet bridge that manages the
/// sending account. Keys never pass through here.
pub struct EthRpcClient {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl EthRpcClient {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// `eth_sendTransaction`, returns the transaction hash
    pub async fn send_transaction(&self, from: &str, to: &str, value_wei: u128) -> Result<String> {
        let tx = json!({
            "from": from,
            "to": to,
            "value": to_quantity(value_wei),
        });
        self.call("eth_sendTransaction", json!([tx])).await
    }

    /// `eth_getTransactionReceipt`, `None` while the transaction is pending
    pub async fn transaction_receipt(&self, hash: &str) -> Result<Option<TransactionReceipt>> {
        self.call("eth_getTransactionReceipt", json!([hash])).await
    }

    pub async fn chain_id(&self) -> Result<u64> {
        let hex: String = self.call("eth_chainId", json!([])).await?;
        u64::from_str_radix(hex.trim_start_matches("0x"), 16).map_err(|e| RpcError::Rpc {
            code: -32000,
            message: format!("invalid chain id {}: {}", hex, e),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self.client.post(&self.url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RpcError::Http { status, body });
        }

        decode_response(&body)
    }
}

fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    // Decoded as a map: `"result": null` (pending receipt) differs from a missing result
    let mut response: serde_json::Map<String, Value> = serde_json::from_str(body)?;

    if let Some(err) = response.remove("error").filter(|e| !e.is_null()) {
        let err: RpcErrorObject = serde_json::from_value(err)?;
        return Err(RpcError::Rpc {
            code: err.code,
            message: err.message,
        });
    }

    match response.remove("result") {
        Some(value) => Ok(serde_json::from_value(value)?),
        None => Err(RpcError::MissingResult),
    }
}

/// Hex quantity encoding: no leading zeros, "0x0" for zero
pub fn to_quantity(value: u128) -> String {
    format!("{:#x}", value)
}
