// Test doubles shared by the tip tests
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Mutex;

use tokio::sync::Semaphore;

use crate::tip::notify::{NotificationId, Notifier, Toast};
use crate::tip::wallet::{TxHandle, TxStatus, Wallet, WalletError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Shown(NotificationId, Toast),
    Updated(NotificationId, Toast),
    Dismissed(NotificationId),
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    next_id: AtomicU64,
    events: Mutex<Vec<Event>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn shown(&self) -> Vec<(NotificationId, Toast)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Shown(id, toast) => Some((id, toast)),
                _ => None,
            })
            .collect()
    }

    pub fn updated(&self) -> Vec<(NotificationId, Toast)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Updated(id, toast) => Some((id, toast)),
                _ => None,
            })
            .collect()
    }

    pub fn dismissed(&self) -> Vec<NotificationId> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Dismissed(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, toast: Toast) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.events.lock().unwrap().push(Event::Shown(id, toast));
        id
    }

    fn update(&self, id: NotificationId, toast: Toast) {
        self.events.lock().unwrap().push(Event::Updated(id, toast));
    }

    fn dismiss(&self, id: NotificationId) {
        self.events.lock().unwrap().push(Event::Dismissed(id));
    }
}

/// Wallet whose submission blocks until `release` is called
pub struct GatedWallet {
    gate: Semaphore,
    submissions: AtomicU32,
    status: TxStatus,
}

impl GatedWallet {
    pub fn new(status: TxStatus) -> Self {
        Self {
            gate: Semaphore::new(0),
            submissions: AtomicU32::new(0),
            status,
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn submission_count(&self) -> u32 {
        self.submissions.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Wallet for GatedWallet {
    async fn submit(&self, _to: &str, _value_wei: u64) -> Result<TxHandle, WalletError> {
        let n = self.submissions.fetch_add(1, Ordering::SeqCst);
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
        Ok(TxHandle(format!("0xtx{}", n)))
    }

    async fn watch(&self, _handle: &TxHandle) -> Result<TxStatus, WalletError> {
        Ok(self.status)
    }
}
