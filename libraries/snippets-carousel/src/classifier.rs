//! Slot classification
//!
//! Maps a lane to its visual role purely from its position relative to the
//! focus lane. Lanes before the focus are parked left, the focus lane is the
//! only `Focused` one, the next `total - 1` lanes stack behind it, and
//! everything further right is parked right.

use crate::types::{SlotLayout, SlotTransform, VisualRole};

/// Classify one lane
///
/// Deterministic and side-effect free. Exactly one lane (`focus_lane`) is
/// `Focused` for any `total >= 1`; `Receding` weights strictly decrease with
/// depth and parked lanes weigh 0. With `total == 0` nothing is focused.
pub fn classify(linear_index: usize, focus_lane: usize, total: usize) -> (VisualRole, f32) {
    if total == 0 {
        return (VisualRole::OffRight, 0.0);
    }

    if linear_index < focus_lane {
        return (VisualRole::OffLeft, 0.0);
    }

    let depth = linear_index - focus_lane;
    if depth == 0 {
        (VisualRole::Focused, 1.0)
    } else if depth < total {
        let weight = (total - depth) as f32 / total as f32;
        (VisualRole::Receding(depth), weight)
    } else {
        (VisualRole::OffRight, 0.0)
    }
}

impl SlotLayout {
    /// Placement of a slot with `role` in a stack of `total` cards
    pub fn transform(&self, role: VisualRole, total: usize) -> SlotTransform {
        let off_screen = self.card_width * self.off_screen_distance;

        match role {
            VisualRole::OffLeft => self.parked(-off_screen),
            VisualRole::OffRight => self.parked(off_screen),
            VisualRole::Focused => SlotTransform {
                translate_x: self.lane_offset,
                translate_y: 0.0,
                scale: 1.0,
                opacity: 1.0,
                z_index: total as i32,
            },
            VisualRole::Receding(depth) => {
                let d = depth as f32;
                let shift = d * self.receding_step;
                SlotTransform {
                    translate_x: shift + self.lane_offset,
                    translate_y: shift * 0.5,
                    scale: (1.0 - d * self.receding_scale_step).max(0.0),
                    opacity: (1.0 - d * self.receding_opacity_step).max(0.0),
                    z_index: total as i32 - depth as i32,
                }
            }
        }
    }

    fn parked(&self, x: f32) -> SlotTransform {
        SlotTransform {
            translate_x: x + self.lane_offset,
            translate_y: 0.0,
            scale: self.off_screen_scale,
            opacity: 0.0,
            z_index: 0,
        }
    }
}
