//! Fixed-window generation quota.

use std::time::Duration;

use tracing::debug;

use replyforge_protocols::PipelineError;

/// Counts completed generations in the current window.
///
/// The window is fixed, not sliding: [`reset`](Self::reset) is driven by a
/// timer regardless of when the counted runs happened. Only successful runs
/// are recorded, so blocked or failed attempts never use quota.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    count: u32,
    max: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            count: 0,
            max,
            window,
        }
    }

    /// Fails once the window's quota is used up.
    pub fn check(&self) -> Result<(), PipelineError> {
        if self.count >= self.max {
            Err(PipelineError::RateLimitExceeded {
                count: self.count,
                max: self.max,
            })
        } else {
            Ok(())
        }
    }

    pub fn record_success(&mut self) {
        self.count = self.count.saturating_add(1);
        debug!("Rate limit updated: {}/{}", self.count, self.max);
    }

    pub fn reset(&mut self) {
        self.count = 0;
        debug!("Rate limit window reset");
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_until_max() {
        let mut limiter = RateLimiter::new(3, Duration::from_secs(3600));
        for _ in 0..3 {
            assert!(limiter.check().is_ok());
            limiter.record_success();
        }
        assert!(matches!(
            limiter.check(),
            Err(PipelineError::RateLimitExceeded { count: 3, max: 3 })
        ));
    }

    #[test]
    fn test_check_does_not_consume() {
        let limiter = RateLimiter::new(1, Duration::from_secs(3600));
        for _ in 0..5 {
            assert!(limiter.check().is_ok());
        }
        assert_eq!(limiter.count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(3600));
        limiter.record_success();
        assert!(limiter.check().is_err());
        limiter.reset();
        assert_eq!(limiter.count(), 0);
        assert!(limiter.check().is_ok());
    }

    #[test]
    fn test_zero_max_always_blocks() {
        let limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert!(limiter.check().is_err());
    }
}
