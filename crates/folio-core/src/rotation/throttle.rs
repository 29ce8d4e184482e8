//! L4 Atomic Layer: recency gate for wheel input

use std::time::Duration;

use tokio::time::Instant;

/// Default minimum gap between wheel-driven steps
pub const DEFAULT_WHEEL_THROTTLE: Duration = Duration::from_millis(800);

/// Rejects wheel triggers that arrive within `window` of the last accepted one
#[derive(Debug, Clone)]
pub struct WheelThrottle {
    window: Duration,
    last_accepted: Option<Instant>,
}

impl Default for WheelThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_WHEEL_THROTTLE)
    }
}

impl WheelThrottle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// True once strictly more than `window` has passed since the last record
    pub fn is_open(&self, now: Instant) -> bool {
        match self.last_accepted {
            Some(last) => now.saturating_duration_since(last) > self.window,
            None => true,
        }
    }

    /// Remember an accepted wheel trigger
    pub fn record(&mut self, now: Instant) {
        self.last_accepted = Some(now);
    }
}
