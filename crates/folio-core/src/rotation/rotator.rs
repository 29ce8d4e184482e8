//! L3 Molecular Layer: the Rotator façade
//!
//! Composes `RotationState`, `Scheduler`, `TransitionGuard`, `WheelThrottle`
//! and `Transition` into the only component input handlers and renderers talk
//! to. All mutation goes through `&mut self`; renderers get `&RotationState`
//! in callbacks or read `state()` between frames.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, warn};

use super::guard::TransitionGuard;
use super::scheduler::Scheduler;
use super::state::{Direction, RotationMode, RotationState};
use super::throttle::WheelThrottle;
use super::timeline::{Transition, TransitionSnapshot};
use crate::Result;

type StateListener = Box<dyn FnMut(&RotationState) + Send>;
type CompletionListener = Box<dyn FnMut() + Send>;

/// How an accepted transition is finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionMode {
    /// Released when the declared duration elapses
    #[default]
    Timed,
    /// Released by the renderer's `complete_transition()` signal
    Signalled,
}

/// Runtime configuration of one rotator
#[derive(Debug, Clone, PartialEq)]
pub struct RotatorConfig {
    pub item_count: usize,
    pub interval_ms: u64,
    pub direction: Direction,
    pub pausable: bool,
    pub queue_mode: bool,
    /// Declared duration of one transition
    pub transition_ms: u64,
    pub completion: CompletionMode,
    pub pause_on_hover: bool,
    pub wheel_enabled: bool,
    pub wheel_throttle_ms: u64,
    /// A transition running longer than `stuck_factor * transition_ms` is
    /// force-released
    pub stuck_factor: u32,
    /// Advance once as soon as `start()` is called
    pub immediate: bool,
}

impl RotatorConfig {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            interval_ms: 5000,
            direction: Direction::Forward,
            pausable: true,
            queue_mode: false,
            transition_ms: 600,
            completion: CompletionMode::Timed,
            pause_on_hover: false,
            wheel_enabled: false,
            wheel_throttle_ms: 800,
            stuck_factor: 2,
            immediate: false,
        }
    }

    #[inline]
    pub fn mode(&self) -> RotationMode {
        if self.queue_mode {
            RotationMode::Queue
        } else {
            RotationMode::Index
        }
    }

    #[inline]
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// How long a transition may run before the guard is force-released
    #[inline]
    pub fn stuck_limit(&self) -> Duration {
        self.transition_duration() * self.stuck_factor.max(1)
    }
}

/// Where a trigger came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// Scheduler tick
    Timer,
    /// Arrow, dot, key
    Manual,
    /// Scroll wheel
    Wheel,
}

/// Why a trigger did not start a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    /// A transition is already in flight
    Busy,
    /// Inside the wheel throttle window
    Throttled,
    /// Wheel input is not enabled for this rotator
    WheelDisabled,
    /// The target is already current
    Unchanged,
    /// The rotator was torn down
    TornDown,
}

/// Result of a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Accepted,
    Dropped(DropReason),
}

impl TriggerOutcome {
    #[inline]
    pub fn is_accepted(self) -> bool {
        self == TriggerOutcome::Accepted
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Transitioning,
    TornDown,
}

/// What a `poll()` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollReport {
    /// The in-flight transition finished on time
    pub completed: bool,
    /// The in-flight transition was force-released as stuck
    pub forced: bool,
    /// Outcome of a due scheduler tick
    pub tick: Option<TriggerOutcome>,
}

/// Point-in-time view of a rotator for status lines and JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RotatorSnapshot {
    pub name: String,
    pub phase: Phase,
    pub state: RotationState,
    pub running: bool,
    pub paused: bool,
    pub hovered: bool,
    pub transition: Option<TransitionSnapshot>,
}

/// Auto-advancing, interruptible rotation over a fixed set of items
pub struct Rotator {
    name: String,
    config: RotatorConfig,
    state: RotationState,
    guard: TransitionGuard,
    scheduler: Scheduler,
    throttle: WheelThrottle,
    transition: Option<Transition>,
    hovered: bool,
    user_paused: bool,
    torn_down: bool,
    state_listener: Option<StateListener>,
    completion_listener: Option<CompletionListener>,
}

impl fmt::Debug for Rotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotator")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("phase", &self.phase())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Rotator {
    /// Create an idle rotator with a stopped scheduler
    ///
    /// Fails fast on fewer than two items or a zero interval.
    pub fn new(name: impl Into<String>, config: RotatorConfig) -> Result<Self> {
        let state = RotationState::new(config.item_count, config.mode(), config.direction)?;
        let scheduler = Scheduler::from_millis(config.interval_ms)?;
        let throttle = WheelThrottle::new(Duration::from_millis(config.wheel_throttle_ms));

        Ok(Self {
            name: name.into(),
            config,
            state,
            guard: TransitionGuard::new(),
            scheduler,
            throttle,
            transition: None,
            hovered: false,
            user_paused: false,
            torn_down: false,
            state_listener: None,
            completion_listener: None,
        })
    }

    /// Set the state-change listener (builder form)
    pub fn with_state_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut(&RotationState) + Send + 'static,
    {
        self.on_state_change(listener);
        self
    }

    /// Set the completion listener (builder form)
    pub fn with_completion_listener<F>(mut self, listener: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_transition_complete(listener);
        self
    }

    /// Called once per accepted transition with the new state
    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(&RotationState) + Send + 'static,
    {
        self.state_listener = Some(Box::new(listener));
    }

    /// Called whenever an in-flight transition finishes
    pub fn on_transition_complete<F>(&mut self, listener: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.completion_listener = Some(Box::new(listener));
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn config(&self) -> &RotatorConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.torn_down {
            Phase::TornDown
        } else if self.guard.is_busy() {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.guard.is_busy()
    }

    /// Whether automatic ticks are currently scheduled
    #[inline]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.user_paused
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn guard(&self) -> &TransitionGuard {
        &self.guard
    }

    /// Progress view of the in-flight transition
    pub fn transition(&self) -> Option<TransitionSnapshot> {
        let now = Instant::now();
        self.transition.as_ref().map(|t| t.snapshot(now))
    }

    pub fn snapshot(&self) -> RotatorSnapshot {
        RotatorSnapshot {
            name: self.name.clone(),
            phase: self.phase(),
            state: self.state.clone(),
            running: self.is_running(),
            paused: self.is_paused(),
            hovered: self.hovered,
            transition: self.transition(),
        }
    }

    /// Start automatic rotation
    ///
    /// With `immediate` configured, also advances once right away.
    pub fn start(&mut self) -> Option<TriggerOutcome> {
        if self.torn_down {
            return None;
        }
        let now = Instant::now();
        if self.can_run() {
            self.scheduler.start(now);
        }
        debug!("Rotator '{}' started (interval={}ms)", self.name, self.config.interval_ms);

        if self.config.immediate {
            let next = self.state.advance();
            Some(self.trigger(TriggerSource::Timer, next))
        } else {
            None
        }
    }

    /// Step forward
    pub fn advance(&mut self) -> TriggerOutcome {
        let next = self.state.advance();
        self.trigger(TriggerSource::Manual, next)
    }

    /// Step backward (index mode only)
    pub fn retreat(&mut self) -> Result<TriggerOutcome> {
        let next = self.state.retreat();
        self.try_trigger(TriggerSource::Manual, next)
    }

    /// Go straight to `target` (index mode only)
    pub fn jump_to(&mut self, target: i64) -> Result<TriggerOutcome> {
        let next = self.state.jump_to(target);
        self.try_trigger(TriggerSource::Manual, next)
    }

    /// Step forward from the scroll wheel
    ///
    /// Two gates: the throttle window and the transition guard. The throttle
    /// only records triggers that pass both.
    pub fn wheel(&mut self) -> TriggerOutcome {
        if self.torn_down {
            return TriggerOutcome::Dropped(DropReason::TornDown);
        }
        if !self.config.wheel_enabled {
            return TriggerOutcome::Dropped(DropReason::WheelDisabled);
        }

        let now = Instant::now();
        if !self.throttle.is_open(now) {
            debug!("Rotator '{}' wheel trigger throttled", self.name);
            return TriggerOutcome::Dropped(DropReason::Throttled);
        }

        let next = self.state.advance();
        let outcome = self.trigger(TriggerSource::Wheel, next);
        if outcome.is_accepted() {
            self.throttle.record(now);
        }
        outcome
    }

    /// Stop automatic ticks. Ignored for non-pausable rotators.
    pub fn pause(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        if !self.config.pausable {
            debug!("Rotator '{}' is not pausable, ignoring pause", self.name);
            return false;
        }
        self.user_paused = true;
        self.scheduler.stop();
        true
    }

    /// Restart automatic ticks from a fresh interval
    pub fn resume(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.user_paused = false;
        if self.can_run() {
            self.scheduler.start(Instant::now());
        }
        true
    }

    /// Pointer entered the rotator's area
    pub fn hover_enter(&mut self) {
        if self.torn_down || self.hovered {
            return;
        }
        self.hovered = true;
        if !self.config.pause_on_hover {
            return;
        }

        let now = Instant::now();
        self.scheduler.stop();
        if let Some(transition) = self.transition.as_mut() {
            transition.freeze(now);
        }
        debug!("Rotator '{}' suspended by hover", self.name);
    }

    /// Pointer left the rotator's area
    pub fn hover_leave(&mut self) {
        if self.torn_down || !self.hovered {
            return;
        }
        self.hovered = false;
        if !self.config.pause_on_hover {
            return;
        }

        let now = Instant::now();
        if let Some(transition) = self.transition.as_mut() {
            transition.thaw(now);
        }
        if self.can_run() {
            self.scheduler.start(now);
        }
        debug!("Rotator '{}' resumed after hover", self.name);
    }

    /// Change the automatic interval; the timer is recreated
    pub fn set_interval(&mut self, interval_ms: u64) -> Result<()> {
        self.scheduler
            .set_interval(Duration::from_millis(interval_ms), Instant::now())?;
        self.config.interval_ms = interval_ms;
        Ok(())
    }

    /// The renderer's "transition finished" signal
    ///
    /// Returns false when nothing was in flight.
    pub fn complete_transition(&mut self) -> bool {
        if self.torn_down || !self.guard.exit() {
            return false;
        }
        self.transition = None;
        self.notify_complete();
        true
    }

    /// Advance time: settle the in-flight transition, then deliver a due tick
    pub fn poll(&mut self) -> PollReport {
        let mut report = PollReport::default();
        if self.torn_down {
            return report;
        }
        let now = Instant::now();

        let (finished, stuck) = match self.transition.as_ref() {
            Some(t) => match self.config.completion {
                CompletionMode::Timed => (t.is_complete(now), false),
                CompletionMode::Signalled => (false, t.elapsed(now) >= self.config.stuck_limit()),
            },
            None => (false, false),
        };

        if finished {
            report.completed = self.complete_transition();
        } else if stuck {
            warn!(
                "Rotator '{}' transition not completed after {:?}, releasing guard",
                self.name,
                self.config.stuck_limit()
            );
            self.guard.release();
            self.transition = None;
            self.notify_complete();
            report.forced = true;
        }

        if self.scheduler.poll(now) {
            let next = self.state.advance();
            report.tick = Some(self.trigger(TriggerSource::Timer, next));
        }

        report
    }

    /// Earliest instant at which `poll()` has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.torn_down {
            return None;
        }
        let now = Instant::now();
        let settle = self.transition.as_ref().and_then(|t| {
            let limit = match self.config.completion {
                CompletionMode::Timed => t.duration(),
                CompletionMode::Signalled => self.config.stuck_limit(),
            };
            t.deadline_for(limit, now)
        });

        match (settle, self.scheduler.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Release everything. Safe mid-transition; later triggers are dropped.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.stop();
        self.scheduler.clear_callback();
        self.guard.release();
        self.transition = None;
        self.state_listener = None;
        self.completion_listener = None;
        self.torn_down = true;
        debug!("Rotator '{}' torn down", self.name);
    }

    fn can_run(&self) -> bool {
        !self.torn_down && !self.user_paused && !(self.hovered && self.config.pause_on_hover)
    }

    fn try_trigger(
        &mut self,
        source: TriggerSource,
        next: Result<RotationState>,
    ) -> Result<TriggerOutcome> {
        if self.torn_down {
            return Ok(TriggerOutcome::Dropped(DropReason::TornDown));
        }
        Ok(self.trigger(source, next?))
    }

    fn trigger(&mut self, source: TriggerSource, next: RotationState) -> TriggerOutcome {
        if self.torn_down {
            return TriggerOutcome::Dropped(DropReason::TornDown);
        }
        if next == self.state {
            return TriggerOutcome::Dropped(DropReason::Unchanged);
        }

        let now = Instant::now();
        if !self.guard.try_enter(now) {
            debug!("Rotator '{}' {:?} trigger dropped: transition in flight", self.name, source);
            return TriggerOutcome::Dropped(DropReason::Busy);
        }

        self.transition = Some(Transition::begin(
            now,
            self.config.transition_duration(),
            next.motion(),
        ));
        self.state = next;

        if source != TriggerSource::Timer && self.scheduler.is_running() {
            self.scheduler.restart(now);
        }

        debug!(
            "Rotator '{}' {:?} trigger accepted, current={}",
            self.name,
            source,
            self.state.current()
        );

        if let Some(listener) = self.state_listener.as_mut() {
            listener(&self.state);
        }
        TriggerOutcome::Accepted
    }

    fn notify_complete(&mut self) {
        if let Some(listener) = self.completion_listener.as_mut() {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::time::advance;

    use crate::Error;

    const MS: Duration = Duration::from_millis(1);

    fn config(item_count: usize) -> RotatorConfig {
        RotatorConfig {
            interval_ms: 1000,
            transition_ms: 100,
            ..RotatorConfig::new(item_count)
        }
    }

    fn rotator(config: RotatorConfig) -> Rotator {
        Rotator::new("test", config).unwrap()
    }

    /// Let the in-flight transition run out and settle it
    async fn settle(rotator: &mut Rotator) {
        advance(MS * 100).await;
        rotator.poll();
    }

    #[test]
    fn test_degenerate_configuration() {
        let err = Rotator::new("one", RotatorConfig::new(1)).unwrap_err();
        assert!(matches!(err, Error::DegenerateConfiguration { item_count: 1 }));

        let zero_interval = RotatorConfig {
            interval_ms: 0,
            ..RotatorConfig::new(3)
        };
        assert!(matches!(Rotator::new("zero", zero_interval), Err(Error::InvalidInterval)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_index_wraparound() {
        let mut rotator = rotator(config(4));
        assert_eq!(rotator.state().current(), 0);
        assert_eq!(rotator.phase(), Phase::Idle);

        let mut seen = Vec::new();
        for _ in 0..4 {
            assert!(rotator.advance().is_accepted());
            seen.push(rotator.state().current());
            settle(&mut rotator).await;
        }
        assert_eq!(seen, vec![1, 2, 3, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_queue_rotation() {
        let mut rotator = rotator(RotatorConfig {
            queue_mode: true,
            ..config(3)
        });

        rotator.advance();
        assert_eq!(rotator.state().order(), &[1, 2, 0]);
        settle(&mut rotator).await;
        rotator.advance();
        assert_eq!(rotator.state().order(), &[2, 0, 1]);

        assert!(matches!(rotator.retreat(), Err(Error::Unsupported { .. })));
        assert!(matches!(rotator.jump_to(0), Err(Error::Unsupported { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_while_busy() {
        let mut rotator = rotator(config(4));

        assert_eq!(rotator.advance(), TriggerOutcome::Accepted);
        assert_eq!(rotator.advance(), TriggerOutcome::Dropped(DropReason::Busy));
        assert_eq!(rotator.state().current(), 1);
        assert_eq!(rotator.guard().entered(), 1);

        settle(&mut rotator).await;
        assert_eq!(rotator.phase(), Phase::Idle);
        assert!(rotator.advance().is_accepted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_listener_only_sees_accepted() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut rotator = rotator(config(4)).with_state_listener(move |state| {
            sink.lock().unwrap().push(state.current());
        });

        rotator.advance();
        rotator.advance();
        rotator.retreat().unwrap();
        settle(&mut rotator).await;
        rotator.retreat().unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutual_exclusion_under_interleaving() {
        let started = Arc::new(AtomicU64::new(0));
        let completed = Arc::new(AtomicU64::new(0));

        let s = started.clone();
        let c = completed.clone();
        let mut rotator = rotator(RotatorConfig {
            wheel_enabled: true,
            interval_ms: 70,
            ..config(5)
        })
        .with_state_listener(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        })
        .with_completion_listener(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        rotator.start();

        for step in 0u64..400 {
            match step % 7 {
                0 => {
                    rotator.advance();
                }
                1 => {
                    let _ = rotator.retreat();
                }
                2 => {
                    let _ = rotator.jump_to((step % 5) as i64);
                }
                3 => {
                    rotator.wheel();
                }
                4 => {
                    rotator.complete_transition();
                }
                _ => {}
            }
            advance(MS * (step % 45) as u32).await;
            rotator.poll();

            let begun = started.load(Ordering::SeqCst);
            let ended = completed.load(Ordering::SeqCst);
            assert!(begun >= ended);
            assert!(begun - ended <= 1);
            assert!(rotator.state().is_permutation());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_jump_out_of_range_leaves_state() {
        let mut rotator = rotator(config(4));
        rotator.jump_to(2).unwrap();
        settle(&mut rotator).await;

        for target in [4, -1] {
            let err = rotator.jump_to(target).unwrap_err();
            assert!(matches!(err, Error::OutOfRange { len: 4, .. }));
            assert_eq!(rotator.state().current(), 2);
            assert_eq!(rotator.phase(), Phase::Idle);
        }

        assert_eq!(
            rotator.jump_to(2).unwrap(),
            TriggerOutcome::Dropped(DropReason::Unchanged)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduler_ticks_advance() {
        let mut rotator = rotator(config(3));
        rotator.start();

        advance(MS * 999).await;
        assert_eq!(rotator.poll().tick, None);

        advance(MS).await;
        assert_eq!(rotator.poll().tick, Some(TriggerOutcome::Accepted));
        assert_eq!(rotator.state().current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_trigger_restarts_cadence() {
        let mut rotator = rotator(config(3));
        let t0 = Instant::now();
        rotator.start();

        advance(MS * 900).await;
        rotator.advance();
        assert_eq!(rotator.scheduler().next_due(), Some(t0 + MS * 1900));

        advance(MS * 200).await;
        let report = rotator.poll();
        assert!(report.completed);
        assert_eq!(report.tick, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_idempotent() {
        let mut rotator = rotator(config(3));
        rotator.start();

        advance(MS * 300).await;
        let now = Instant::now();
        rotator.pause();
        rotator.pause();
        assert!(!rotator.is_running());
        rotator.resume();
        rotator.resume();

        assert!(rotator.is_running());
        assert_eq!(rotator.scheduler().next_due(), Some(now + MS * 1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unpausable_ignores_pause() {
        let mut rotator = rotator(RotatorConfig {
            pausable: false,
            ..config(3)
        });
        rotator.start();
        assert!(!rotator.pause());
        assert!(rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_throttle() {
        let mut rotator = rotator(RotatorConfig {
            wheel_enabled: true,
            ..config(4)
        });

        assert!(rotator.wheel().is_accepted());
        advance(MS * 400).await;
        rotator.poll();
        assert_eq!(rotator.phase(), Phase::Idle);
        assert_eq!(rotator.wheel(), TriggerOutcome::Dropped(DropReason::Throttled));

        advance(MS * 401).await;
        assert!(rotator.wheel().is_accepted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_busy_does_not_arm_throttle() {
        let mut rotator = rotator(RotatorConfig {
            wheel_enabled: true,
            transition_ms: 2000,
            ..config(4)
        });

        rotator.advance();
        assert_eq!(rotator.wheel(), TriggerOutcome::Dropped(DropReason::Busy));
        advance(MS * 2000).await;
        rotator.poll();
        assert!(rotator.wheel().is_accepted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_disabled() {
        let mut rotator = rotator(config(4));
        assert_eq!(rotator.wheel(), TriggerOutcome::Dropped(DropReason::WheelDisabled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_signalled_completion() {
        let completions = Arc::new(AtomicU64::new(0));
        let c = completions.clone();
        let mut rotator = rotator(RotatorConfig {
            completion: CompletionMode::Signalled,
            ..config(3)
        })
        .with_completion_listener(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        rotator.advance();
        advance(MS * 150).await;
        rotator.poll();
        assert!(rotator.is_transitioning());

        assert!(rotator.complete_transition());
        assert!(!rotator.complete_transition());
        assert_eq!(completions.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_guard_released() {
        let mut rotator = rotator(RotatorConfig {
            completion: CompletionMode::Signalled,
            ..config(3)
        });

        rotator.advance();
        advance(MS * 199).await;
        assert!(!rotator.poll().forced);

        advance(MS).await;
        assert!(rotator.poll().forced);
        assert_eq!(rotator.phase(), Phase::Idle);
        assert!(rotator.advance().is_accepted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_freezes_and_restarts() {
        let mut rotator = rotator(RotatorConfig {
            pause_on_hover: true,
            ..config(3)
        });
        rotator.start();
        rotator.advance();

        advance(MS * 40).await;
        rotator.hover_enter();
        assert!(!rotator.is_running());
        assert!(rotator.transition().unwrap().frozen);

        advance(MS * 5000).await;
        let report = rotator.poll();
        assert!(!report.completed);
        assert_eq!(report.tick, None);
        assert_eq!(rotator.next_deadline(), None);

        let leave_at = Instant::now();
        rotator.hover_leave();
        assert_eq!(rotator.scheduler().next_due(), Some(leave_at + MS * 1000));

        advance(MS * 60).await;
        assert!(rotator.poll().completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_leave_respects_explicit_pause() {
        let mut rotator = rotator(RotatorConfig {
            pause_on_hover: true,
            ..config(3)
        });
        rotator.start();
        rotator.hover_enter();
        rotator.pause();
        rotator.hover_leave();
        assert!(!rotator.is_running());

        rotator.resume();
        assert!(rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hover_without_policy_keeps_running() {
        let mut rotator = rotator(config(3));
        rotator.start();
        rotator.hover_enter();
        assert!(rotator.is_hovered());
        assert!(rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_mid_transition() {
        let mut rotator = rotator(config(3));
        rotator.start();
        rotator.advance();
        rotator.teardown();

        assert_eq!(rotator.phase(), Phase::TornDown);
        assert!(!rotator.guard().is_busy());
        assert!(!rotator.is_running());
        assert_eq!(rotator.next_deadline(), None);
        assert_eq!(rotator.advance(), TriggerOutcome::Dropped(DropReason::TornDown));
        assert_eq!(
            rotator.jump_to(0).unwrap(),
            TriggerOutcome::Dropped(DropReason::TornDown)
        );
        assert!(!rotator.resume());

        advance(MS * 5000).await;
        assert_eq!(rotator.poll(), PollReport::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_start() {
        let mut rotator = rotator(RotatorConfig {
            queue_mode: true,
            immediate: true,
            ..config(4)
        });
        assert_eq!(rotator.start(), Some(TriggerOutcome::Accepted));
        assert_eq!(rotator.state().current(), 1);
        assert!(rotator.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_deadline() {
        let mut rotator = rotator(config(3));
        assert_eq!(rotator.next_deadline(), None);

        let t0 = Instant::now();
        rotator.start();
        assert_eq!(rotator.next_deadline(), Some(t0 + MS * 1000));

        rotator.advance();
        assert_eq!(rotator.next_deadline(), Some(t0 + MS * 100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_interval() {
        let mut rotator = rotator(config(3));
        rotator.start();
        let now = Instant::now();

        rotator.set_interval(250).unwrap();
        assert_eq!(rotator.scheduler().next_due(), Some(now + MS * 250));
        assert!(matches!(rotator.set_interval(0), Err(Error::InvalidInterval)));
        assert_eq!(rotator.config().interval_ms, 250);
    }
}
