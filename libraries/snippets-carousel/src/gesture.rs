//! Drag gesture interpretation
//!
//! Only a completed drag on the focused slot can rotate the carousel, and only
//! when it is both long enough and fast enough. Dragging the focused card to
//! the right reveals the previous card; dragging it left reveals the next one.

use crate::types::{GestureThresholds, RotateCommand};
use serde::{Deserialize, Serialize};

/// Phase reported by the platform gesture recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Finger down
    Begin,

    /// Finger moving
    Active,

    /// Finger lifted
    End,
}

/// Raw drag sample along the carousel axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Cumulative translation since `Begin`
    pub translation: f32,

    /// Instantaneous velocity (units per second)
    pub velocity: f32,

    /// Recognizer phase
    pub phase: GesturePhase,
}

impl GestureEvent {
    /// Convenience constructor for a finished drag
    pub fn end(translation: f32, velocity: f32) -> Self {
        Self {
            translation,
            velocity,
            phase: GesturePhase::End,
        }
    }
}

/// Turns gestures into rotate commands
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    thresholds: GestureThresholds,
}

impl GestureInterpreter {
    /// Create an interpreter with the given thresholds
    pub fn new(thresholds: GestureThresholds) -> Self {
        Self { thresholds }
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &GestureThresholds {
        &self.thresholds
    }

    /// Interpret a completed drag on the focused slot
    ///
    /// Rotates only if `|translation| > distance_fraction × slot_width` **and**
    /// `|velocity| > min_velocity`. Anything else (including NaN input) is
    /// below threshold and yields `None`.
    pub fn interpret(&self, translation: f32, velocity: f32, slot_width: f32) -> Option<RotateCommand> {
        let far_enough = translation.abs() > self.thresholds.distance_fraction * slot_width;
        let fast_enough = velocity.abs() > self.thresholds.min_velocity;

        if !(far_enough && fast_enough) {
            return None;
        }

        if translation > 0.0 {
            Some(RotateCommand::Previous)
        } else {
            Some(RotateCommand::Next)
        }
    }

    /// Feed one recognizer event; only `End` can produce a command
    pub fn on_event(&self, event: GestureEvent, slot_width: f32) -> Option<RotateCommand> {
        match event.phase {
            GesturePhase::Begin | GesturePhase::Active => None,
            GesturePhase::End => self.interpret(event.translation, event.velocity, slot_width),
        }
    }

    /// Tap on a slot `distance` lanes away from the focus
    ///
    /// Tapping a stacked or parked card jumps straight to it; tapping the
    /// focused card never rotates.
    pub fn tap(&self, distance: i64) -> Option<RotateCommand> {
        (distance != 0).then_some(RotateCommand::Jump(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 200.0;

    #[test]
    fn fast_long_drag_rotates() {
        let g = GestureInterpreter::default();
        assert_eq!(g.interpret(-61.0, -501.0, WIDTH), Some(RotateCommand::Next));
        assert_eq!(g.interpret(61.0, 900.0, WIDTH), Some(RotateCommand::Previous));
    }

    #[test]
    fn thresholds_are_strict() {
        let g = GestureInterpreter::default();
        // Exactly 0.3 × width
        assert_eq!(g.interpret(60.0, 2000.0, WIDTH), None);
        // Exactly 500
        assert_eq!(g.interpret(150.0, 500.0, WIDTH), None);
    }

    #[test]
    fn both_conditions_required() {
        let g = GestureInterpreter::default();
        assert_eq!(g.interpret(190.0, 100.0, WIDTH), None);
        assert_eq!(g.interpret(10.0, 5000.0, WIDTH), None);
    }

    #[test]
    fn direction_follows_translation_not_velocity() {
        let g = GestureInterpreter::default();
        // Flicked back at the end, but the card was dragged right
        assert_eq!(g.interpret(120.0, -800.0, WIDTH), Some(RotateCommand::Previous));
    }

    #[test]
    fn nan_never_rotates() {
        let g = GestureInterpreter::default();
        assert_eq!(g.interpret(f32::NAN, 900.0, WIDTH), None);
        assert_eq!(g.interpret(100.0, f32::NAN, WIDTH), None);
    }

    #[test]
    fn only_end_phase_counts() {
        let g = GestureInterpreter::default();
        let mut event = GestureEvent {
            translation: -150.0,
            velocity: -900.0,
            phase: GesturePhase::Active,
        };
        assert_eq!(g.on_event(event, WIDTH), None);

        event.phase = GesturePhase::End;
        assert_eq!(g.on_event(event, WIDTH), Some(RotateCommand::Next));
    }

    #[test]
    fn custom_thresholds() {
        let g = GestureInterpreter::new(GestureThresholds {
            distance_fraction: 0.1,
            min_velocity: 50.0,
        });
        assert_eq!(g.interpret(-25.0, -60.0, WIDTH), Some(RotateCommand::Next));
    }

    #[test]
    fn tap_jumps_by_distance() {
        let g = GestureInterpreter::default();
        assert_eq!(g.tap(0), None);
        assert_eq!(g.tap(2), Some(RotateCommand::Jump(2)));
        assert_eq!(g.tap(-3), Some(RotateCommand::Jump(-3)));
    }
}
