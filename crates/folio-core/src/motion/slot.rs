//! L4 Atomic Layer: resting positions of a card stack

use serde::{Deserialize, Serialize};

/// Resting pose of the card at stack depth `i`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub z_index: usize,
}

/// Place stack depth `i` of `total`: each step back moves right by
/// `dist_x`, up by `dist_y`, and away by `1.5 * dist_x`
pub fn make_slot(i: usize, dist_x: f64, dist_y: f64, total: usize) -> Slot {
    let depth = i as f64;
    Slot {
        x: depth * dist_x,
        y: -depth * dist_y,
        z: -depth * dist_x * 1.5,
        z_index: total.saturating_sub(i),
    }
}

/// Spacing of a card stack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    pub card_distance: f64,
    pub vertical_distance: f64,
    pub card_count: usize,
}

impl SlotLayout {
    pub fn new(card_count: usize) -> Self {
        Self {
            card_distance: 60.0,
            vertical_distance: 70.0,
            card_count,
        }
    }

    pub fn slot(&self, i: usize) -> Slot {
        make_slot(i, self.card_distance, self.vertical_distance, self.card_count)
    }

    /// Slot of the last card in the stack
    pub fn back(&self) -> Slot {
        self.slot(self.card_count.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_slot_is_origin_on_top() {
        let slot = make_slot(0, 60.0, 70.0, 4);
        assert_eq!(slot, Slot { x: 0.0, y: 0.0, z: 0.0, z_index: 4 });
    }

    #[test]
    fn test_deeper_slots_recede() {
        let layout = SlotLayout::new(4);
        let back = layout.back();
        assert_eq!(back.x, 180.0);
        assert_eq!(back.y, -210.0);
        assert_eq!(back.z, -270.0);
        assert_eq!(back.z_index, 1);
    }
}
