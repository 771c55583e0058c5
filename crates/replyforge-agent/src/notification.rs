//! Transient user notifications.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use replyforge_protocols::{NotificationId, NotificationKind, NotificationSurface};

struct Active {
    id: NotificationId,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct PresenterState {
    next_id: u64,
    active: Option<Active>,
}

/// Shows at most one notification at a time.
///
/// Showing a new notification removes the current one. Each notification
/// fades after `dismiss_after` and is removed `fade` later, unless it was
/// dismissed or replaced first.
#[derive(Clone)]
pub struct NotificationPresenter {
    surface: Arc<dyn NotificationSurface>,
    dismiss_after: Duration,
    fade: Duration,
    state: Arc<Mutex<PresenterState>>,
}

impl NotificationPresenter {
    pub fn new(surface: Arc<dyn NotificationSurface>, dismiss_after: Duration, fade: Duration) -> Self {
        Self {
            surface,
            dismiss_after,
            fade,
            state: Arc::new(Mutex::new(PresenterState::default())),
        }
    }

    pub fn show(&self, kind: NotificationKind, message: &str) -> NotificationId {
        let mut state = self.state.lock();
        if let Some(previous) = state.active.take() {
            previous.timer.abort();
            self.surface.remove(previous.id);
        }

        state.next_id += 1;
        let id = NotificationId(state.next_id);
        self.surface.show(id, kind, message);

        let timer = tokio::spawn(Self::expire(
            id,
            self.surface.clone(),
            self.state.clone(),
            self.dismiss_after,
            self.fade,
        ));
        state.active = Some(Active { id, timer });
        id
    }

    pub fn info(&self, message: &str) -> NotificationId {
        self.show(NotificationKind::Info, message)
    }

    pub fn success(&self, message: &str) -> NotificationId {
        self.show(NotificationKind::Success, message)
    }

    pub fn warning(&self, message: &str) -> NotificationId {
        self.show(NotificationKind::Warning, message)
    }

    pub fn error(&self, message: &str) -> NotificationId {
        self.show(NotificationKind::Error, message)
    }

    pub fn loading(&self, message: &str) -> NotificationId {
        self.show(NotificationKind::Loading, message)
    }

    /// Remove the current notification immediately.
    pub fn dismiss(&self) {
        if let Some(active) = self.state.lock().active.take() {
            active.timer.abort();
            self.surface.remove(active.id);
        }
    }

    pub fn active(&self) -> Option<NotificationId> {
        self.state.lock().active.as_ref().map(|a| a.id)
    }

    async fn expire(
        id: NotificationId,
        surface: Arc<dyn NotificationSurface>,
        state: Arc<Mutex<PresenterState>>,
        dismiss_after: Duration,
        fade: Duration,
    ) {
        tokio::time::sleep(dismiss_after).await;
        surface.fade(id);
        tokio::time::sleep(fade).await;

        let mut state = state.lock();
        if state.active.as_ref().is_some_and(|a| a.id == id) {
            state.active = None;
            surface.remove(id);
        }
    }
}

/// Renders notifications as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSurface;

impl NotificationSurface for TracingSurface {
    fn show(&self, id: NotificationId, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Error => error!(notification = id.0, "{}", message),
            NotificationKind::Warning => warn!(notification = id.0, "{}", message),
            _ => info!(notification = id.0, kind = ?kind, "{}", message),
        }
    }

    fn fade(&self, id: NotificationId) {
        debug!(notification = id.0, "fading");
    }

    fn remove(&self, id: NotificationId) {
        debug!(notification = id.0, "removed");
    }
}

#[cfg(test)]
#[path = "notification_tests.rs"]
mod tests;
