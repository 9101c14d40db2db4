// User-visible notifications for tip progress
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::tip::session::{TipSession, TipState};
use crate::tip::TipFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Progress,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: String,
    pub description: String,
}

/// The shared display surface.
///
/// Several sessions may use it at once; each only touches ids it was handed.
/// Toasts stay up until dismissed.
pub trait Notifier: Send + Sync {
    fn show(&self, toast: Toast) -> NotificationId;

    fn update(&self, id: NotificationId, toast: Toast);

    fn dismiss(&self, id: NotificationId);
}

/// Owned reference to a visible notification.
///
/// Dropping a handle that was never settled dismisses the notification, so a
/// session torn down mid-flight leaves nothing behind.
pub struct NotificationHandle {
    id: NotificationId,
    surface: Arc<dyn Notifier>,
    open: bool,
}

impl NotificationHandle {
    pub fn open(surface: Arc<dyn Notifier>, toast: Toast) -> Self {
        let id = surface.show(toast);
        Self {
            id,
            surface,
            open: true,
        }
    }

    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Swap in the final message and leave it visible
    pub fn settle(mut self, toast: Toast) {
        self.surface.update(self.id, toast);
        self.open = false;
    }

    /// Swap in the final message and dismiss it after `delay`
    pub fn settle_with_expiry(mut self, toast: Toast, delay: Duration) {
        self.surface.update(self.id, toast);
        self.open = false;

        let surface = Arc::clone(&self.surface);
        let id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    surface.dismiss(id);
                });
            }
            Err(_) => surface.dismiss(id),
        }
    }
}

impl Drop for NotificationHandle {
    fn drop(&mut self) {
        if self.open {
            self.surface.dismiss(self.id);
        }
    }
}

impl std::fmt::Debug for NotificationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHandle")
            .field("id", &self.id)
            .field("open", &self.open)
            .finish()
    }
}

/// Turns tip state transitions into notifications, one handle per session
pub struct NotificationBridge {
    surface: Arc<dyn Notifier>,
    amount_display: String,
    success_dismiss_after: Duration,
}

impl NotificationBridge {
    pub fn new(surface: Arc<dyn Notifier>, amount_display: String, success_dismiss_after: Duration) -> Self {
        Self {
            surface,
            amount_display,
            success_dismiss_after,
        }
    }

    pub fn on_transition(
        &self,
        session: &mut TipSession,
        _previous: TipState,
        next: TipState,
        failure: Option<&TipFailure>,
    ) {
        match next {
            TipState::Submitting => {
                let toast = Toast {
                    kind: ToastKind::Progress,
                    title: "Sending tip...".to_string(),
                    description: format!("Tipping @{} with {}", session.recipient, self.amount_display),
                };
                // Replacing an existing handle drops (and dismisses) it
                session.notification = Some(NotificationHandle::open(Arc::clone(&self.surface), toast));
            }
            TipState::Confirmed => {
                let toast = Toast {
                    kind: ToastKind::Success,
                    title: "Tip sent successfully!".to_string(),
                    description: format!("You tipped @{} with {}", session.recipient, self.amount_display),
                };
                self.take_or_open(session, &toast)
                    .settle_with_expiry(toast, self.success_dismiss_after);
            }
            TipState::Failed => {
                let reason = failure
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| "unknown error".to_string());
                let toast = Toast {
                    kind: ToastKind::Error,
                    title: "Tip failed".to_string(),
                    description: format!("Could not tip @{}: {}", session.recipient, reason),
                };
                self.take_or_open(session, &toast).settle(toast);
            }
            TipState::Idle | TipState::AwaitingConfirmation => {}
        }
    }

    fn take_or_open(&self, session: &mut TipSession, toast: &Toast) -> NotificationHandle {
        session
            .notification
            .take()
            .unwrap_or_else(|| NotificationHandle::open(Arc::clone(&self.surface), toast.clone()))
    }
}

/// Renders notifications as log lines, for the CLI
#[derive(Debug, Default)]
pub struct LogNotifier {
    next_id: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for LogNotifier {
    fn show(&self, toast: Toast) -> NotificationId {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed));
        log_toast(id, &toast);
        id
    }

    fn update(&self, id: NotificationId, toast: Toast) {
        log_toast(id, &toast);
    }

    fn dismiss(&self, _id: NotificationId) {}
}

fn log_toast(id: NotificationId, toast: &Toast) {
    match toast.kind {
        ToastKind::Error => error!(notification = id.0, "{}: {}", toast.title, toast.description),
        _ => info!(notification = id.0, "{}: {}", toast.title, toast.description),
    }
}
