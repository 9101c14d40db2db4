use crate::tip::notify::NotificationHandle;
use crate::tip::wallet::TxHandle;

/// Lifecycle of a single tip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TipState {
    Idle,
    Submitting,
    AwaitingConfirmation,
    Confirmed,
    Failed,
}

impl TipState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TipState::Confirmed | TipState::Failed)
    }

    /// Allowed edges of the state machine
    pub fn can_transition_to(&self, next: TipState) -> bool {
        use TipState::*;
        matches!(
            (self, next),
            (Idle, Submitting)
                | (Submitting, AwaitingConfirmation)
                | (Submitting, Failed)
                | (AwaitingConfirmation, Confirmed)
                | (AwaitingConfirmation, Failed)
        )
    }
}

impl std::fmt::Display for TipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipState::Idle => write!(f, "idle"),
            TipState::Submitting => write!(f, "submitting"),
            TipState::AwaitingConfirmation => write!(f, "awaiting confirmation"),
            TipState::Confirmed => write!(f, "confirmed"),
            TipState::Failed => write!(f, "failed"),
        }
    }
}

/// One in-flight tip. Never persisted.
#[derive(Debug)]
pub struct TipSession {
    pub post_id: String,
    /// Author handle, used in notification text
    pub recipient: String,
    pub destination_address: String,
    pub amount_wei: u64,
    pub state: TipState,
    pub tx: Option<TxHandle>,
    /// The one notification this session owns. Dropping it dismisses it.
    pub notification: Option<NotificationHandle>,
}

impl TipSession {
    pub fn new(post_id: String, recipient: String, destination_address: String, amount_wei: u64) -> Self {
        Self {
            post_id,
            recipient,
            destination_address,
            amount_wei,
            state: TipState::Idle,
            tx: None,
            notification: None,
        }
    }
}
