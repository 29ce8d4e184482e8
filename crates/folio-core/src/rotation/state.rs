//! L4 Atomic Layer: rotation data model and pure transforms
//!
//! Nothing here touches clocks or callbacks. Every transform takes the current
//! state by reference and returns the next one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Travel direction of a rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// +1
    #[default]
    Forward,
    /// -1
    Backward,
}

impl Direction {
    /// Signed step for index arithmetic
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// How a rotator moves through its items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// A single current-position pointer (carousels, rotators)
    Index,
    /// Front-to-back cycling of a full permutation (card stacks)
    Queue,
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationMode::Index => f.write_str("index"),
            RotationMode::Queue => f.write_str("queue"),
        }
    }
}

/// Snapshot of what a rotator is currently presenting
///
/// `order` is always a permutation of `0..len`. In index mode it stays the
/// identity and `index` points at the current item. In queue mode `order` is
/// rewritten on every step and `index` is unused (always 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotationState {
    mode: RotationMode,
    order: Vec<usize>,
    index: usize,
    /// Configured travel direction used by `advance`
    direction: Direction,
    /// Side the last accepted step came from (for entry animations)
    motion: Direction,
}

impl RotationState {
    /// Create the initial state: identity order, index 0
    pub fn new(item_count: usize, mode: RotationMode, direction: Direction) -> Result<Self> {
        if item_count < 2 {
            return Err(Error::DegenerateConfiguration { item_count });
        }

        Ok(Self {
            mode,
            order: (0..item_count).collect(),
            index: 0,
            direction,
            motion: direction,
        })
    }

    #[inline]
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Number of items being rotated
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: construction rejects fewer than two items
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Raw index pointer (index mode)
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn motion(&self) -> Direction {
        self.motion
    }

    /// Item currently in front: the pointed-at item in index mode, the head
    /// of the order in queue mode
    pub fn current(&self) -> usize {
        match self.mode {
            RotationMode::Index => self.index,
            RotationMode::Queue => self.order[0],
        }
    }

    /// Step once in the configured direction
    pub fn advance(&self) -> Self {
        match self.mode {
            RotationMode::Index => self.stepped(self.direction),
            RotationMode::Queue => {
                let mut next = self.clone();
                next.order.rotate_left(1);
                next.motion = Direction::Forward;
                next
            }
        }
    }

    /// Inverse of `advance` (index mode only)
    pub fn retreat(&self) -> Result<Self> {
        self.require_index("retreat")?;
        Ok(self.stepped(self.direction.reversed()))
    }

    /// Point directly at `target` (index mode only)
    pub fn jump_to(&self, target: i64) -> Result<Self> {
        self.require_index("jump_to")?;

        let len = self.len();
        let index = usize::try_from(target)
            .ok()
            .filter(|&i| i < len)
            .ok_or(Error::OutOfRange { target, len })?;
        if index == self.index {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.motion = if index > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        next.index = index;
        Ok(next)
    }

    /// Check the permutation invariant
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.order.len()];
        for &item in &self.order {
            match seen.get_mut(item) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        self.index < self.order.len()
    }

    fn stepped(&self, direction: Direction) -> Self {
        let len = self.len() as i64;
        let index = (self.index as i64 + direction.sign()).rem_euclid(len) as usize;

        let mut next = self.clone();
        next.index = index;
        next.motion = direction;
        next
    }

    fn require_index(&self, operation: &'static str) -> Result<()> {
        match self.mode {
            RotationMode::Index => Ok(()),
            RotationMode::Queue => Err(Error::Unsupported {
                operation,
                mode: self.mode,
            }),
        }
    }
}
