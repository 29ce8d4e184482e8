//! L4 Atomic Layer: restartable interval timer
//!
//! The scheduler is clock-driven rather than task-driven: whoever owns it
//! calls `poll(now)` and learns whether a tick was due. That keeps it usable
//! from a synchronous frame loop and from an async driver alike.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use crate::{Error, Result};

type TickCallback = Box<dyn FnMut() + Send>;

/// Periodic trigger with start/stop/restart
pub struct Scheduler {
    interval: Duration,
    next_due: Option<Instant>,
    on_tick: Option<TickCallback>,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("interval", &self.interval)
            .field("next_due", &self.next_due)
            .field("has_callback", &self.on_tick.is_some())
            .finish()
    }
}

impl Scheduler {
    /// Create a stopped scheduler
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidInterval);
        }
        Ok(Self {
            interval,
            next_due: None,
            on_tick: None,
        })
    }

    /// Convenience constructor from milliseconds
    pub fn from_millis(interval_ms: u64) -> Result<Self> {
        Self::new(Duration::from_millis(interval_ms))
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next tick fires, if running
    #[inline]
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Begin emitting. A running timer is replaced, never stacked.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    /// Cancel pending emission
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Reset the cadence so the next tick is a full interval from `now`
    pub fn restart(&mut self, now: Instant) {
        self.stop();
        self.start(now);
    }

    /// Change the interval; a running timer is recreated with it
    pub fn set_interval(&mut self, interval: Duration, now: Instant) -> Result<()> {
        if interval.is_zero() {
            return Err(Error::InvalidInterval);
        }
        self.interval = interval;
        if self.is_running() {
            self.restart(now);
        }
        Ok(())
    }

    /// Register the tick callback, replacing any previous one
    pub fn on_tick<F>(&mut self, callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.on_tick = Some(Box::new(callback));
    }

    /// Drop the tick callback
    pub fn clear_callback(&mut self) {
        self.on_tick = None;
    }

    /// Fire a due tick
    ///
    /// At most one tick per call. The following tick is scheduled one interval
    /// after `now`, so a late poll never produces a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(now + self.interval);
                if let Some(callback) = self.on_tick.as_mut() {
                    callback();
                }
                true
            }
            _ => false,
        }
    }
}
