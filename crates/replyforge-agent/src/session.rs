//! Per-process page-side state.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use replyforge_protocols::{ElementHandle, PipelineError};

use crate::rate_limit::RateLimiter;

#[derive(Debug)]
struct SessionState {
    limiter: RateLimiter,
    active_surface: Option<ElementHandle>,
    listening: bool,
}

/// State shared by the observer and every pipeline run it starts.
///
/// Created once at startup and owned by the [`Observer`](crate::Observer);
/// nothing here outlives the process.
#[derive(Debug)]
pub struct Session {
    state: Mutex<SessionState>,
}

impl Session {
    pub fn new(limiter: RateLimiter) -> Self {
        Self {
            state: Mutex::new(SessionState {
                limiter,
                active_surface: None,
                listening: false,
            }),
        }
    }

    pub fn check_rate(&self) -> Result<(), PipelineError> {
        self.state.lock().limiter.check()
    }

    pub fn record_success(&self) {
        self.state.lock().limiter.record_success();
    }

    pub fn reset_rate(&self) {
        self.state.lock().limiter.reset();
    }

    /// `(count, max)` of the current window.
    pub fn rate_usage(&self) -> (u32, u32) {
        let state = self.state.lock();
        (state.limiter.count(), state.limiter.max())
    }

    pub fn set_active_surface(&self, surface: ElementHandle) {
        self.state.lock().active_surface = Some(surface);
    }

    pub fn active_surface(&self) -> Option<ElementHandle> {
        self.state.lock().active_surface
    }

    /// Claim the single interaction listener. Returns `false` if one is
    /// already registered.
    pub fn start_listening(&self) -> bool {
        let mut state = self.state.lock();
        !std::mem::replace(&mut state.listening, true)
    }

    /// Reset the rate limiter every window until `shutdown` is cancelled.
    pub fn spawn_window_reset(self: &Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let window = session.state.lock().limiter.window();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + window, window);
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        session.reset_rate();
                        info!("Hourly reply quota restored");
                    }
                }
            }
            debug!("Rate window timer stopped");
        })
    }
}
