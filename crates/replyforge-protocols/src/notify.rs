//! Notification surface protocol.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
    Loading,
}

/// Identifies one shown notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// Where notifications are rendered.
///
/// Implementations only draw; lifetime (single instance, auto-dismiss,
/// fade-out) is managed by the presenter that calls them.
pub trait NotificationSurface: Send + Sync {
    fn show(&self, id: NotificationId, kind: NotificationKind, message: &str);

    /// Start the fade-out animation.
    fn fade(&self, id: NotificationId);

    /// Remove the notification. Removing an unknown id is a no-op.
    fn remove(&self, id: NotificationId);
}
