//! Persisted usage statistics shown to the user.
//!
//! Independent of the page-side rate limiter: the two counters reset on
//! different schedules and are allowed to disagree.

use serde::{Deserialize, Serialize};

/// Length of the usage-statistics hour, in milliseconds.
pub const USAGE_WINDOW_MS: i64 = 3_600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    #[serde(default)]
    pub total_replies: u64,

    #[serde(default)]
    pub current_hour_replies: u32,

    /// Epoch milliseconds of the last hourly reset.
    #[serde(default)]
    pub last_reset: i64,
}

impl UsageStats {
    pub fn new(now_ms: i64) -> Self {
        Self {
            total_replies: 0,
            current_hour_replies: 0,
            last_reset: now_ms,
        }
    }

    /// Zero the hourly counter if more than an hour passed since the last
    /// reset. Returns whether a reset happened.
    pub fn refresh(&mut self, now_ms: i64) -> bool {
        if now_ms - self.last_reset > USAGE_WINDOW_MS {
            self.current_hour_replies = 0;
            self.last_reset = now_ms;
            true
        } else {
            false
        }
    }

    pub fn record_reply(&mut self, now_ms: i64) {
        self.refresh(now_ms);
        self.total_replies += 1;
        self.current_hour_replies += 1;
    }

    pub fn remaining(&self, max_per_hour: u32) -> u32 {
        max_per_hour.saturating_sub(self.current_hour_replies)
    }
}
