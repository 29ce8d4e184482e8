//! Async driver for a single Rotator
//!
//! `RotatorService` owns the rotator inside a tokio task and sleeps until the
//! rotator's next deadline; `RotatorHandle` is the cloneable remote control.

mod driver;
mod handle;

pub use driver::{RotatorEvent, RotatorService};
pub use handle::{RotatorCommand, RotatorHandle};
