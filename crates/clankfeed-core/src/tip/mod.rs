//! Tipping a post's author from the feed.
//!
//! [`TipController`] runs one [`TipSession`] per post through
//! `Idle -> Submitting -> AwaitingConfirmation -> Confirmed | Failed`,
//! refusing a second tip on a post while one is in flight.
//! [`NotificationBridge`] mirrors each transition onto the [`Notifier`]
//! surface. The chain side is the [`Wallet`] capability.

pub mod controller;
pub mod notify;
pub mod session;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

use crate::models::Chain;

pub use controller::TipController;
pub use notify::{LogNotifier, NotificationBridge, NotificationHandle, NotificationId, Notifier, Toast, ToastKind};
pub use session::{TipSession, TipState};
pub use wallet::{TxHandle, TxStatus, Wallet, WalletError};

/// Tip requests refused before any session exists
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TipError {
    #[error("Tipping disabled: @{username} has no verified {chain} address")]
    TippingDisabled {
        post_id: String,
        username: String,
        chain: Chain,
    },

    #[error("A tip for post {post_id} is already in flight")]
    AlreadyInFlight { post_id: String },
}

/// Why a session ended in `Failed`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TipFailure {
    #[error("submission failed: {0}")]
    SubmissionError(String),

    #[error("confirmation timed out")]
    ConfirmationTimeout,

    #[error("transaction reverted")]
    ConfirmationReverted,

    #[error("confirmation failed: {0}")]
    ConfirmationError(String),
}

/// Terminal result of a tip session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TipOutcome {
    Confirmed { tx: TxHandle },
    Failed { reason: TipFailure, tx: Option<TxHandle> },
}

impl TipOutcome {
    pub fn state(&self) -> TipState {
        match self {
            TipOutcome::Confirmed { .. } => TipState::Confirmed,
            TipOutcome::Failed { .. } => TipState::Failed,
        }
    }
}
