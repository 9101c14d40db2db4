use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{info, warn};

use crate::config::TipConfig;
use crate::models::Post;
use crate::tip::notify::{NotificationBridge, Notifier};
use crate::tip::session::{TipSession, TipState};
use crate::tip::wallet::{TxStatus, Wallet, WalletError};
use crate::tip::{TipError, TipFailure, TipOutcome};

type Sessions = Mutex<HashMap<String, TipState>>;

/// Drives tip sessions, at most one per post at a time
pub struct TipController {
    wallet: Arc<dyn Wallet>,
    bridge: NotificationBridge,
    config: TipConfig,
    sessions: Sessions,
}

impl TipController {
    pub fn new(wallet: Arc<dyn Wallet>, surface: Arc<dyn Notifier>, config: TipConfig) -> Self {
        let bridge = NotificationBridge::new(
            surface,
            config.amount_display(),
            Duration::from_millis(config.success_dismiss_ms),
        );

        Self {
            wallet,
            bridge,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// State of the in-flight session for `post_id`, if any
    pub fn state_of(&self, post_id: &str) -> Option<TipState> {
        lock(&self.sessions).get(post_id).copied()
    }

    /// A tip needs a verified address on the configured chain and no tip in flight
    pub fn is_tip_enabled(&self, post: &Post) -> bool {
        post.tip_address(self.config.chain).is_some() && self.state_of(&post.id).is_none()
    }

    /// Tip the author of `post` with the configured fixed amount.
    ///
    /// Returns `Err` only when the tip is refused up front (no address, or
    /// a session for this post already in flight). Once a session exists,
    /// every failure ends in `TipOutcome::Failed`.
    pub async fn tip(&self, post: &Post) -> Result<TipOutcome, TipError> {
        let destination = post
            .tip_address(self.config.chain)
            .ok_or_else(|| TipError::TippingDisabled {
                post_id: post.id.clone(),
                username: post.author.username.clone(),
                chain: self.config.chain,
            })?
            .to_string();

        let slot = InFlight::claim(&self.sessions, &post.id)?;
        let mut session = TipSession::new(
            post.id.clone(),
            post.author.username.clone(),
            destination,
            self.config.amount_wei,
        );

        self.advance(&mut session, &slot, TipState::Submitting, None);

        let tx = match self
            .wallet
            .submit(&session.destination_address, session.amount_wei)
            .await
        {
            Ok(tx) => tx,
            Err(e) => {
                let reason = TipFailure::SubmissionError(e.to_string());
                return Ok(self.fail(&mut session, &slot, reason));
            }
        };

        info!(post_id = %session.post_id, tx = %tx, "Tip submitted");
        session.tx = Some(tx.clone());
        self.advance(&mut session, &slot, TipState::AwaitingConfirmation, None);

        let outcome = match self.wallet.watch(&tx).await {
            Ok(TxStatus::Finalized) => {
                self.advance(&mut session, &slot, TipState::Confirmed, None);
                TipOutcome::Confirmed { tx }
            }
            Ok(TxStatus::Reverted) => self.fail(&mut session, &slot, TipFailure::ConfirmationReverted),
            Err(WalletError::Timeout) => self.fail(&mut session, &slot, TipFailure::ConfirmationTimeout),
            Err(e) => self.fail(&mut session, &slot, TipFailure::ConfirmationError(e.to_string())),
        };

        Ok(outcome)
    }

    fn fail(&self, session: &mut TipSession, slot: &InFlight<'_>, reason: TipFailure) -> TipOutcome {
        warn!(post_id = %session.post_id, "Tip failed: {}", reason);
        self.advance(session, slot, TipState::Failed, Some(&reason));
        TipOutcome::Failed {
            reason,
            tx: session.tx.clone(),
        }
    }

    fn advance(
        &self,
        session: &mut TipSession,
        slot: &InFlight<'_>,
        next: TipState,
        failure: Option<&TipFailure>,
    ) {
        let previous = session.state;
        debug_assert!(
            previous.can_transition_to(next),
            "illegal tip transition {} -> {}",
            previous,
            next
        );

        session.state = next;
        slot.set(next);
        info!(post_id = %session.post_id, from = %previous, to = %next, "Tip transition");
        self.bridge.on_transition(session, previous, next, failure);
    }
}

/// Marks a post as having a tip in flight; released on drop
struct InFlight<'a> {
    sessions: &'a Sessions,
    post_id: String,
}

impl<'a> InFlight<'a> {
    fn claim(sessions: &'a Sessions, post_id: &str) -> Result<Self, TipError> {
        let mut map = lock(sessions);
        if map.contains_key(post_id) {
            return Err(TipError::AlreadyInFlight {
                post_id: post_id.to_string(),
            });
        }
        map.insert(post_id.to_string(), TipState::Idle);

        Ok(Self {
            sessions,
            post_id: post_id.to_string(),
        })
    }

    fn set(&self, state: TipState) {
        lock(self.sessions).insert(self.post_id.clone(), state);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.sessions).remove(&self.post_id);
    }
}

fn lock(sessions: &Sessions) -> MutexGuard<'_, HashMap<String, TipState>> {
    sessions.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
