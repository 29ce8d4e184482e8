//! Interruptible rotation engine
//!
//! Drives carousels (index mode) and card stacks (queue mode) from a timer
//! and from user input, admitting at most one transition at a time.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `state` - Rotation data model and pure transforms
//! - `scheduler` - Restartable, clock-driven interval timer
//! - `guard` - At-most-one-transition admission lock
//! - `throttle` - Recency gate for wheel input
//! - `timeline` - Clock of the in-flight transition (freeze/thaw)
//!
//! ## L3 Molecular Layer
//! - `rotator` - Public façade composing the atoms
//!
//! # Usage
//!
//! ```ignore
//! use folio_core::rotation::{Rotator, RotatorConfig};
//!
//! let mut rotator = Rotator::new("skills", RotatorConfig::new(4))?
//!     .with_state_listener(|state| println!("now showing {}", state.current()));
//! rotator.start();
//!
//! // In the frame loop
//! rotator.poll();
//!
//! // From input handlers
//! rotator.advance();
//! rotator.jump_to(2)?;
//! ```

// L4 Atomic Layer
pub mod guard;
pub mod scheduler;
pub mod state;
pub mod throttle;
pub mod timeline;

// L3 Molecular Layer
pub mod rotator;

pub use guard::TransitionGuard;
pub use rotator::{
    CompletionMode, DropReason, Phase, PollReport, Rotator, RotatorConfig, RotatorSnapshot,
    TriggerOutcome, TriggerSource,
};
pub use scheduler::Scheduler;
pub use state::{Direction, RotationMode, RotationState};
pub use throttle::{WheelThrottle, DEFAULT_WHEEL_THROTTLE};
pub use timeline::{Transition, TransitionSnapshot};
