//! L3 Molecular Layer: card-swap timeline plan
//!
//! One swap has three overlapping phases measured in seconds from the start:
//! the front card drops, the remaining cards are promoted one slot forward
//! with a small stagger, and the dropped card returns to the back slot. The
//! latest phase end is the swap's declared duration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::slot::{Slot, SlotLayout};

/// Delay between successive promoted cards (seconds)
pub const PROMOTE_STAGGER: f64 = 0.15;

/// How far the front card falls before returning
pub const DROP_DISTANCE: f64 = 500.0;

/// Named swap feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapEasing {
    #[default]
    Elastic,
    Smooth,
}

/// Phase durations (seconds) and overlaps of one swap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapProfile {
    pub easing: EasingType,
    pub drop: f64,
    pub movement: f64,
    pub back: f64,
    /// Fraction of the drop overlapped by the promotion
    pub promote_overlap: f64,
    /// Fraction of the movement before the return starts
    pub return_delay: f64,
}

impl SwapEasing {
    pub fn profile(self) -> SwapProfile {
        match self {
            SwapEasing::Elastic => SwapProfile {
                easing: EasingType::Elastic,
                drop: 2.0,
                movement: 2.0,
                back: 2.0,
                promote_overlap: 0.9,
                return_delay: 0.05,
            },
            SwapEasing::Smooth => SwapProfile {
                easing: EasingType::PowerInOut,
                drop: 0.8,
                movement: 0.8,
                back: 0.8,
                promote_overlap: 0.45,
                return_delay: 0.2,
            },
        }
    }
}

/// Interpolated pose of one card during a swap
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardPose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub z_index: usize,
}

impl From<Slot> for CardPose {
    fn from(slot: Slot) -> Self {
        Self {
            x: slot.x,
            y: slot.y,
            z: slot.z,
            z_index: slot.z_index,
        }
    }
}

/// Timeline of one swap for a stack of `card_count` cards
#[derive(Debug, Clone, PartialEq)]
pub struct SwapPlan {
    profile: SwapProfile,
    layout: SlotLayout,
    promote_at: f64,
    return_at: f64,
    total: f64,
}

impl SwapPlan {
    pub fn new(easing: SwapEasing, layout: SlotLayout) -> Self {
        let profile = easing.profile();
        let promote_at = profile.drop - profile.drop * profile.promote_overlap;
        let return_at = promote_at + profile.movement * profile.return_delay;

        let promoted = layout.card_count.saturating_sub(1);
        let last_promote_end = if promoted == 0 {
            0.0
        } else {
            promote_at + (promoted - 1) as f64 * PROMOTE_STAGGER + profile.movement
        };

        let total = profile
            .drop
            .max(last_promote_end)
            .max(return_at + profile.back);

        Self {
            profile,
            layout,
            promote_at,
            return_at,
            total,
        }
    }

    #[inline]
    pub fn profile(&self) -> &SwapProfile {
        &self.profile
    }

    #[inline]
    pub fn layout(&self) -> &SlotLayout {
        &self.layout
    }

    /// Start of the promotion phase (seconds)
    #[inline]
    pub fn promote_at(&self) -> f64 {
        self.promote_at
    }

    /// Start of the return phase (seconds)
    #[inline]
    pub fn return_at(&self) -> f64 {
        self.return_at
    }

    /// Declared duration of the whole swap
    pub fn total_duration(&self) -> Duration {
        Duration::from_secs_f64(self.total)
    }

    /// Pose at `t` seconds of the card now at `position` in the rotated order
    ///
    /// The card at the back (`position == card_count - 1`) is the one that
    /// dropped; every other card moved one slot forward.
    pub fn pose(&self, position: usize, t: f64) -> CardPose {
        let n = self.layout.card_count;
        if n == 0 {
            return CardPose::from(self.layout.slot(0));
        }
        if position + 1 >= n {
            self.dropped_pose(t)
        } else {
            self.promoted_pose(position, t)
        }
    }

    fn dropped_pose(&self, t: f64) -> CardPose {
        let front = self.layout.slot(0);
        let back = self.layout.back();

        if t < self.return_at {
            let k = self.eased(t, 0.0, self.profile.drop);
            return CardPose {
                y: front.y + DROP_DISTANCE * k,
                ..CardPose::from(front)
            };
        }

        // The return tween takes over from wherever the drop had got to
        let k = self.eased(self.return_at, 0.0, self.profile.drop);
        let from = CardPose {
            y: front.y + DROP_DISTANCE * k,
            ..CardPose::from(front)
        };
        let k = self.eased(t, self.return_at, self.profile.back);
        CardPose {
            z_index: back.z_index,
            ..lerp_pose(from, back.into(), k)
        }
    }

    fn promoted_pose(&self, position: usize, t: f64) -> CardPose {
        let from = self.layout.slot(position + 1);
        let to = self.layout.slot(position);

        let start = self.promote_at + position as f64 * PROMOTE_STAGGER;
        let k = self.eased(t, start, self.profile.movement);
        let z_index = if t >= self.promote_at {
            to.z_index
        } else {
            from.z_index
        };
        CardPose {
            z_index,
            ..lerp_pose(from.into(), to.into(), k)
        }
    }

    fn eased(&self, t: f64, start: f64, duration: f64) -> f64 {
        if t <= start {
            return 0.0;
        }
        if duration <= 0.0 {
            return 1.0;
        }
        self.profile.easing.apply((t - start) / duration)
    }
}

fn lerp(from: f64, to: f64, k: f64) -> f64 {
    from + (to - from) * k
}

fn lerp_pose(from: CardPose, to: CardPose, k: f64) -> CardPose {
    CardPose {
        x: lerp(from.x, to.x, k),
        y: lerp(from.y, to.y, k),
        z: lerp(from.z, to.z, k),
        z_index: from.z_index,
    }
}
