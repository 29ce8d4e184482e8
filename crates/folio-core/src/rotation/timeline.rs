//! L4 Atomic Layer: clock of one in-flight transition
//!
//! Tracks elapsed time that can be frozen (hover pause) and thawed again, so
//! a paused transition neither completes nor counts towards the stuck limit.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use super::state::Direction;

/// One in-flight transition
#[derive(Debug, Clone)]
pub struct Transition {
    started: Instant,
    duration: Duration,
    motion: Direction,
    /// Set while the timeline is frozen
    frozen_at: Option<Instant>,
    /// Total time spent frozen before the current freeze
    frozen_total: Duration,
}

impl Transition {
    pub fn begin(now: Instant, duration: Duration, motion: Direction) -> Self {
        Self {
            started: now,
            duration,
            motion,
            frozen_at: None,
            frozen_total: Duration::ZERO,
        }
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn motion(&self) -> Direction {
        self.motion
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    /// Time the timeline has actually run
    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.frozen_at.unwrap_or(now);
        end.saturating_duration_since(self.started)
            .saturating_sub(self.frozen_total)
    }

    /// Progress in [0, 1]; a zero-length transition is always complete
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let ratio = self.elapsed(now).as_secs_f64() / self.duration.as_secs_f64();
        ratio.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_complete(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Stop the clock; no-op if already frozen
    pub fn freeze(&mut self, now: Instant) {
        if self.frozen_at.is_none() {
            self.frozen_at = Some(now);
        }
    }

    /// Restart the clock; no-op if running
    pub fn thaw(&mut self, now: Instant) {
        if let Some(at) = self.frozen_at.take() {
            self.frozen_total += now.saturating_duration_since(at);
        }
    }

    /// Instant at which the timeline will have run for `limit`, if running
    pub fn deadline_for(&self, limit: Duration, now: Instant) -> Option<Instant> {
        if self.is_frozen() {
            return None;
        }
        let remaining = limit.saturating_sub(self.elapsed(now));
        Some(now + remaining)
    }

    /// Renderer-facing view of this transition
    pub fn snapshot(&self, now: Instant) -> TransitionSnapshot {
        TransitionSnapshot {
            progress: self.progress(now),
            duration_ms: self.duration.as_millis() as u64,
            motion: self.motion,
            frozen: self.is_frozen(),
        }
    }
}

/// Read-only view of an in-flight transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionSnapshot {
    pub progress: f64,
    pub duration_ms: u64,
    pub motion: Direction,
    pub frozen: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_progress_and_completion() {
        let start = Instant::now();
        let transition = Transition::begin(start, MS * 400, Direction::Forward);

        assert!((transition.progress(start + MS * 100) - 0.25).abs() < 1e-9);
        assert!(!transition.is_complete(start + MS * 399));
        assert!(transition.is_complete(start + MS * 400));
        assert!((transition.progress(start + MS * 900) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let start = Instant::now();
        let transition = Transition::begin(start, Duration::ZERO, Direction::Forward);
        assert!((transition.progress(start) - 1.0).abs() < 1e-9);
        assert!(transition.is_complete(start));
    }

    #[test]
    fn test_freeze_stops_the_clock() {
        let start = Instant::now();
        let mut transition = Transition::begin(start, MS * 400, Direction::Forward);

        transition.freeze(start + MS * 100);
        transition.freeze(start + MS * 200);
        assert_eq!(transition.elapsed(start + MS * 1000), MS * 100);
        assert!(transition.deadline_for(MS * 400, start + MS * 1000).is_none());

        transition.thaw(start + MS * 1000);
        assert_eq!(transition.elapsed(start + MS * 1100), MS * 200);
        assert!(!transition.is_complete(start + MS * 1299));
        assert!(transition.is_complete(start + MS * 1300));
    }

    #[test]
    fn test_deadline_accounts_for_elapsed() {
        let start = Instant::now();
        let transition = Transition::begin(start, MS * 400, Direction::Backward);
        let now = start + MS * 150;
        assert_eq!(transition.deadline_for(MS * 400, now), Some(start + MS * 400));
        assert_eq!(transition.snapshot(now).motion, Direction::Backward);
    }
}
