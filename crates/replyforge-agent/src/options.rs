//! Agent tunables.

use std::time::Duration;

use replyforge_config::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptions {
    /// Wait between a trigger and the compose-surface lookup.
    pub surface_delay: Duration,
    pub max_ancestor_depth: usize,
    pub max_replies_per_hour: u32,
    pub rate_window: Duration,
    pub dismiss_after: Duration,
    pub fade: Duration,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AgentOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            surface_delay: Duration::from_millis(settings.observer.surface_delay_ms),
            max_ancestor_depth: settings.observer.max_ancestor_depth,
            max_replies_per_hour: settings.limits.max_replies_per_hour,
            rate_window: Duration::from_secs(settings.limits.window_secs),
            dismiss_after: Duration::from_millis(settings.notifications.dismiss_ms),
            fade: Duration::from_millis(settings.notifications.fade_ms),
        }
    }
}
