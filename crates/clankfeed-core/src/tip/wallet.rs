// The wallet capability the tip flow drives
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque transaction reference returned on submission (a tx hash for EVM)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHandle(pub String);

impl std::fmt::Display for TxHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Final status of a watched transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Finalized,
    Reverted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// User declined, insufficient funds, or the wallet refused the request
    #[error("Wallet rejected the transaction: {0}")]
    Rejected(String),

    /// The wallet gave up waiting for a final status
    #[error("Timed out waiting for confirmation")]
    Timeout,

    #[error("Wallet transport error: {0}")]
    Transport(String),
}

/// Submit a value transfer and watch it until it is final.
///
/// Whether `watch` polls or subscribes is up to the implementation. It owns
/// the confirmation timeout and reports it as `WalletError::Timeout`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Wallet: Send + Sync {
    async fn submit(&self, to: &str, value_wei: u64) -> Result<TxHandle, WalletError>;

    async fn watch(&self, handle: &TxHandle) -> Result<TxStatus, WalletError>;
}
