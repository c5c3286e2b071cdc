//! Core types for the card carousel

use serde::{Deserialize, Serialize};
use snippets_core::Card;

/// Visual role of a rendered slot, derived from its distance to the focus lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualRole {
    /// Parked left of the stack (already rotated past)
    OffLeft,

    /// The single card the user is looking at
    Focused,

    /// Stacked behind the focused card, `n` positions away
    Receding(usize),

    /// Parked right of the stack (waiting to enter)
    OffRight,
}

impl VisualRole {
    /// Whether this is the focused slot
    pub fn is_focused(&self) -> bool {
        matches!(self, VisualRole::Focused)
    }

    /// Whether the slot is on screen (focused or stacked)
    pub fn is_visible(&self) -> bool {
        matches!(self, VisualRole::Focused | VisualRole::Receding(_))
    }
}

/// A rendering-time projection of one carousel lane
///
/// Recomputed on every rotation; never stored.
#[derive(Debug, Clone, Serialize)]
pub struct RotationSlot<'a> {
    /// Card shown in this lane
    pub card: &'a Card,

    /// Lane position, `0..window_len`
    pub linear_index: usize,

    /// Mount identity for the renderer
    ///
    /// Follows the card as it moves between lanes, so a slot animates from
    /// off-right through focused to off-left without being remounted.
    pub animation_key: usize,

    /// Discrete role
    pub role: VisualRole,

    /// Continuous weight in `[0, 1]`: 1 when focused, decreasing with depth, 0 off-screen
    pub weight: f32,
}

/// Discrete rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateCommand {
    /// Advance to the next (older) card
    Next,

    /// Go back to the previous (newer) card
    Previous,

    /// Jump by a signed number of positions
    Jump(i64),
}

impl RotateCommand {
    /// Signed step count
    pub fn steps(&self) -> i64 {
        match self {
            RotateCommand::Next => 1,
            RotateCommand::Previous => -1,
            RotateCommand::Jump(steps) => *steps,
        }
    }
}

/// Playback state of the focused card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum PlaybackState {
    /// No resource held
    Idle,

    /// Resource is being prepared
    Loading,

    /// Resource prepared, not playing
    Ready,

    /// Currently playing
    Playing,

    /// Paused mid-clip
    Paused,

    /// Clip reached its natural end (transient, settles to `Idle`)
    Finished,

    /// Preparation or playback failed; play again to retry
    Failed(String),
}

impl PlaybackState {
    /// Whether a resource handle is held in this state
    pub fn holds_resource(&self) -> bool {
        matches!(
            self,
            PlaybackState::Loading | PlaybackState::Ready | PlaybackState::Playing | PlaybackState::Paused
        )
    }

    /// Whether the play icon should show "pause"
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }
}

/// Drag thresholds that turn a gesture into a rotation
///
/// Both must be exceeded. Defaults are the values the app shipped with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Minimum drag distance as a fraction of the slot width
    pub distance_fraction: f32,

    /// Minimum release velocity (axis units per second)
    pub min_velocity: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance_fraction: 0.3,
            min_velocity: 500.0,
        }
    }
}

/// Pixel layout of the stack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotLayout {
    /// Card width (also the gesture slot width)
    pub card_width: f32,

    /// Horizontal shift applied to every lane
    pub lane_offset: f32,

    /// Horizontal shift per receding position
    pub receding_step: f32,

    /// Scale lost per receding position
    pub receding_scale_step: f32,

    /// Opacity lost per receding position
    pub receding_opacity_step: f32,

    /// Scale of parked off-screen slots
    pub off_screen_scale: f32,

    /// Distance of parked slots, in card widths
    pub off_screen_distance: f32,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            card_width: 240.0,
            lane_offset: -30.0,
            receding_step: 20.0,
            receding_scale_step: 0.05,
            receding_opacity_step: 0.2,
            off_screen_scale: 0.8,
            off_screen_distance: 1.5,
        }
    }
}

/// Concrete placement of one slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotTransform {
    /// Horizontal translation
    pub translate_x: f32,

    /// Vertical translation
    pub translate_y: f32,

    /// Uniform scale
    pub scale: f32,

    /// Opacity in `[0, 1]`
    pub opacity: f32,

    /// Stacking order (higher draws on top)
    pub z_index: i32,
}

/// Playback behavior
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start preparing audio as soon as a card gains focus
    ///
    /// Playback itself still waits for an explicit play action.
    pub preload_on_focus: bool,

    /// Key appended as `apikey=` to audio URLs served by the storage backend
    pub audio_api_key: Option<String>,
}

/// Configuration for the carousel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Gesture thresholds
    pub gesture: GestureThresholds,

    /// Stack layout
    pub layout: SlotLayout,

    /// Playback behavior
    pub playback: PlaybackSettings,
}
