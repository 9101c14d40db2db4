// JSON-RPC wallet - bridges EthRpcClient with the Wallet capability
use std::time::Duration;

use async_trait::async_trait;
use clankfeed_api::rpc::USER_REJECTED;
use clankfeed_api::{EthRpcClient, RpcError, Retryable, TransactionReceipt};
use tracing::{debug, warn};

use crate::config::TipConfig;
use crate::tip::{TxHandle, TxStatus, Wallet, WalletError};

/// Sends tips through an RPC endpoint that manages the sender account,
/// and confirms them by polling for the receipt.
pub struct RpcWallet {
    client: EthRpcClient,
    from: String,
    poll_interval: Duration,
    confirm_timeout: Duration,
}

impl RpcWallet {
    pub fn new(client: EthRpcClient, from: String, poll_interval: Duration, confirm_timeout: Duration) -> Self {
        Self {
            client,
            from,
            poll_interval,
            confirm_timeout,
        }
    }

    /// `None` when no sender address is configured
    pub fn from_config(config: &TipConfig) -> Option<Self> {
        let from = config.from_address.clone()?;
        Some(Self::new(
            EthRpcClient::new(config.rpc_url.clone()),
            from,
            Duration::from_millis(config.poll_interval_ms),
            Duration::from_secs(config.confirm_timeout_secs),
        ))
    }

    async fn poll_receipt(&self, handle: &TxHandle) -> Result<TxStatus, WalletError> {
        loop {
            match self.client.transaction_receipt(&handle.0).await {
                Ok(Some(receipt)) => return Ok(receipt_status(&receipt)),
                Ok(None) => debug!(tx = %handle, "Receipt not available yet"),
                // Throttling and node hiccups say nothing about the transaction
                Err(e) if e.is_retryable() => warn!(tx = %handle, "Receipt poll failed: {}", e),
                Err(e) => return Err(WalletError::Transport(e.to_string())),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    async fn submit(&self, to: &str, value_wei: u64) -> Result<TxHandle, WalletError> {
        self.client
            .send_transaction(&self.from, to, u128::from(value_wei))
            .await
            .map(TxHandle)
            .map_err(submission_error)
    }

    async fn watch(&self, handle: &TxHandle) -> Result<TxStatus, WalletError> {
        tokio::time::timeout(self.confirm_timeout, self.poll_receipt(handle))
            .await
            .map_err(|_| WalletError::Timeout)?
    }
}

fn receipt_status(receipt: &TransactionReceipt) -> TxStatus {
    if receipt.reverted() {
        TxStatus::Reverted
    } else {
        TxStatus::Finalized
    }
}

fn submission_error(err: RpcError) -> WalletError {
    match err {
        RpcError::Rpc { code, message } if code == USER_REJECTED => {
            WalletError::Rejected(format!("user declined: {}", message))
        }
        RpcError::Rpc { message, .. } => WalletError::Rejected(message),
        other => WalletError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// (HTTP status, body) answered to one request
    type Reply = (u16, String);

    fn result(value: Value) -> Reply {
        (200, json!({ "jsonrpc": "2.0", "id": 1, "result": value }).to_string())
    }

    fn rpc_error(code: i64, message: &str) -> Reply {
        (200, json!({ "jsonrpc": "2.0", "id": 1, "error": { "code": code, "message": message } }).to_string())
    }

    fn receipt(status: Option<&str>) -> Reply {
        let mut receipt = json!({ "transactionHash": "0xtx", "blockNumber": "0x10" });
        if let Some(status) = status {
            receipt["status"] = json!(status);
        }
        result(receipt)
    }

    /// Serves `replies` in order, one per connection, repeating the last one
    async fn spawn_node(replies: Vec<Reply>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut replies = replies.into_iter();
            let mut last: Option<Reply> = None;
            while let Ok((mut socket, _)) = listener.accept().await {
                read_request(&mut socket).await;
                let (status, body) = match replies.next() {
                    Some(reply) => {
                        last = Some(reply.clone());
                        reply
                    }
                    None => last.clone().unwrap(),
                };
                let reason = match status {
                    200 => "OK",
                    429 => "Too Many Requests",
                    502 => "Bad Gateway",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{}", addr)
    }

    /// Reads headers plus a Content-Length body
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    return;
                }
            }
        }
    }

    async fn wallet_for(replies: Vec<Reply>) -> RpcWallet {
        RpcWallet::new(
            EthRpcClient::new(spawn_node(replies).await),
            "0xsender".into(),
            Duration::from_millis(5),
            Duration::from_secs(5),
        )
    }

    fn unreachable_wallet(timeout: Duration) -> RpcWallet {
        RpcWallet::new(
            EthRpcClient::new("http://127.0.0.1:1".into()),
            "0xsender".into(),
            Duration::from_millis(5),
            timeout,
        )
    }

    #[test]
    fn test_receipt_status_mapping() {
        let mut receipt = TransactionReceipt {
            transaction_hash: "0xabc".into(),
            status: Some("0x1".into()),
            block_number: Some("0x10".into()),
        };
        assert_eq!(receipt_status(&receipt), TxStatus::Finalized);

        receipt.status = Some("0x0".into());
        assert_eq!(receipt_status(&receipt), TxStatus::Reverted);

        receipt.status = None;
        assert_eq!(receipt_status(&receipt), TxStatus::Finalized);
    }

    #[test]
    fn test_submission_error_mapping() {
        let declined = submission_error(RpcError::Rpc {
            code: USER_REJECTED,
            message: "User rejected the request.".into(),
        });
        assert!(matches!(declined, WalletError::Rejected(msg) if msg.starts_with("user declined")));

        let funds = submission_error(RpcError::Rpc {
            code: -32000,
            message: "insufficient funds for gas * price + value".into(),
        });
        assert_eq!(
            funds,
            WalletError::Rejected("insufficient funds for gas * price + value".into())
        );

        assert!(matches!(submission_error(RpcError::MissingResult), WalletError::Transport(_)));
    }

    #[test]
    fn test_from_config_requires_sender() {
        let mut config = TipConfig::default();
        assert!(RpcWallet::from_config(&config).is_none());

        config.from_address = Some("0xsender".into());
        assert!(RpcWallet::from_config(&config).is_some());
    }

    #[tokio::test]
    async fn test_unreachable_node_fails_submission() {
        let wallet = unreachable_wallet(Duration::from_millis(50));
        let result = wallet.submit("0xaaa", 1).await;
        assert!(matches!(result, Err(WalletError::Transport(_))));
    }

    #[tokio::test]
    async fn test_watch_times_out_when_no_receipt_arrives() {
        let wallet = unreachable_wallet(Duration::from_millis(50));
        let result = wallet.watch(&TxHandle("0xabc".into())).await;
        assert_eq!(result, Err(WalletError::Timeout));
    }

    #[tokio::test]
    async fn test_submit_returns_transaction_hash() {
        let wallet = wallet_for(vec![result(json!("0xtx"))]).await;
        assert_eq!(wallet.submit("0xaaa", 1).await, Ok(TxHandle("0xtx".into())));
    }

    #[tokio::test]
    async fn test_submit_declined_by_user() {
        let wallet = wallet_for(vec![rpc_error(USER_REJECTED, "User rejected the request.")]).await;
        let result = wallet.submit("0xaaa", 1).await;
        assert!(matches!(result, Err(WalletError::Rejected(msg)) if msg.starts_with("user declined")));
    }

    #[tokio::test]
    async fn test_watch_polls_pending_until_finalized() {
        let wallet = wallet_for(vec![
            result(Value::Null),
            result(Value::Null),
            receipt(Some("0x1")),
        ])
        .await;

        let status = wallet.watch(&TxHandle("0xtx".into())).await;
        assert_eq!(status, Ok(TxStatus::Finalized));
    }

    #[tokio::test]
    async fn test_watch_polls_pending_until_reverted() {
        let wallet = wallet_for(vec![result(Value::Null), receipt(Some("0x0"))]).await;

        let status = wallet.watch(&TxHandle("0xtx".into())).await;
        assert_eq!(status, Ok(TxStatus::Reverted));
    }

    #[tokio::test]
    async fn test_watch_keeps_polling_through_throttling() {
        let wallet = wallet_for(vec![
            (429, "slow down".into()),
            (502, "<html>bad gateway</html>".into()),
            rpc_error(clankfeed_api::rpc::LIMIT_EXCEEDED, "limit exceeded"),
            receipt(Some("0x1")),
        ])
        .await;

        let status = wallet.watch(&TxHandle("0xtx".into())).await;
        assert_eq!(status, Ok(TxStatus::Finalized));
    }

    #[tokio::test]
    async fn test_watch_without_receipt_status_is_finalized() {
        let wallet = wallet_for(vec![receipt(None)]).await;

        let status = wallet.watch(&TxHandle("0xtx".into())).await;
        assert_eq!(status, Ok(TxStatus::Finalized));
    }

    #[tokio::test]
    async fn test_watch_fails_on_definitive_rpc_error() {
        let wallet = wallet_for(vec![rpc_error(-32602, "invalid params")]).await;

        let status = wallet.watch(&TxHandle("0xtx".into())).await;
        assert!(matches!(status, Err(WalletError::Transport(msg)) if msg.contains("invalid params")));
    }
}
