//! L4 Atomic Layer: at-most-one-transition admission lock

use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Admission lock for transitions
///
/// `try_enter` is the only way in; `exit` is the only way out in the steady
/// state. `release` exists for teardown and the stuck-transition fallback.
#[derive(Debug, Clone, Default)]
pub struct TransitionGuard {
    busy_since: Option<Instant>,
    entered: u64,
    exited: u64,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark busy if free. Returns false (and changes nothing) if already busy.
    pub fn try_enter(&mut self, now: Instant) -> bool {
        if self.busy_since.is_some() {
            return false;
        }
        self.busy_since = Some(now);
        self.entered += 1;
        true
    }

    /// Clear busy after a completed transition
    ///
    /// Returns false when the guard was already free.
    pub fn exit(&mut self) -> bool {
        if self.busy_since.take().is_none() {
            debug!("Transition guard exit while free, ignoring");
            return false;
        }
        self.exited += 1;
        true
    }

    /// Clear busy unconditionally
    pub fn release(&mut self) {
        if self.busy_since.take().is_some() {
            self.exited += 1;
        }
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy_since.is_some()
    }

    /// Wall-clock time spent in the current transition
    pub fn busy_for(&self, now: Instant) -> Option<Duration> {
        self.busy_since.map(|since| now.saturating_duration_since(since))
    }

    /// Number of successful `try_enter` calls
    #[inline]
    pub fn entered(&self) -> u64 {
        self.entered
    }

    /// Number of busy-to-free transitions
    #[inline]
    pub fn exited(&self) -> u64 {
        self.exited
    }
}
