pub mod config;
pub mod error;
pub mod motion;
pub mod rotation;
pub mod service;

pub use config::{AppConfig, CardStackConfig, CarouselConfig};
pub use error::{Error, Result};
pub use rotation::{
    Direction, DropReason, RotationMode, RotationState, Rotator, RotatorConfig, RotatorSnapshot,
    TriggerOutcome, TriggerSource,
};
pub use service::{RotatorEvent, RotatorHandle, RotatorService};
