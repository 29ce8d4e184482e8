//! Motion helpers offered to renderers
//!
//! The rotation engine only needs a declared duration per transition; these
//! modules describe how a renderer can fill that time.

pub mod easing;
pub mod slot;
pub mod swap;

pub use easing::EasingType;
pub use slot::{make_slot, Slot, SlotLayout};
pub use swap::{CardPose, SwapEasing, SwapPlan, SwapProfile, DROP_DISTANCE, PROMOTE_STAGGER};
