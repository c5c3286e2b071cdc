//! Snippets - Card Carousel
//!
//! Platform-agnostic rotation and playback logic for the song-card carousel.
//!
//! This crate provides:
//! - Seamless looping over the newest cards (no visible seam, no duplicated data)
//! - Slot classification (off-left, focused, receding, off-right) with depth weights
//! - Gesture interpretation (distance and velocity thresholds, tap-to-jump)
//! - Focused-card playback with at most one live audio resource
//! - Card-list refreshes that keep the focused card in place
//!
//! # Architecture
//!
//! `snippets-carousel` never touches a UI toolkit or an audio device:
//! - Rendering reads [`Carousel::window`] and [`Carousel::transform`]
//! - Audio goes through the [`AudioBackend`] trait
//! - Asynchronous backend results come back via [`Carousel::handle_audio_event`]
//! - Everything the host should react to is queued as a [`CarouselEvent`]
//!
//! # Example: Rotation
//!
//! ```rust
//! use snippets_carousel::RotationBuffer;
//! use snippets_core::Card;
//!
//! let cards = vec![
//!     Card::new("m3", "Song C", "Artist"),
//!     Card::new("m2", "Song B", "Artist"),
//!     Card::new("m1", "Song A", "Artist"),
//! ];
//!
//! let mut buffer = RotationBuffer::initialize(cards).unwrap();
//! assert_eq!(buffer.focused_card().id.as_str(), "m3");
//!
//! buffer.rotate(-1);
//! assert_eq!(buffer.focused_card().id.as_str(), "m1");
//!
//! let window = buffer.current_window();
//! assert_eq!(window.len(), 9);
//! assert_eq!(window.iter().filter(|s| s.role.is_focused()).count(), 1);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use snippets_carousel::{
//!     AudioBackend, AudioEvent, Carousel, CarouselConfig, GestureEvent, ResourceHandle, Result,
//! };
//! use snippets_core::Card;
//!
//! // Implement AudioBackend for your platform
//! struct NativePlayer {
//!     // ... platform-specific player
//! }
//!
//! impl AudioBackend for NativePlayer {
//!     fn prepare(&mut self, url: &str) -> Result<ResourceHandle> {
//!         // Start loading; report AudioEvent::Prepared later
//!         Ok(ResourceHandle::new(1))
//!     }
//!
//!     fn play(&mut self, handle: ResourceHandle) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self, handle: ResourceHandle) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn release(&mut self, handle: ResourceHandle) {}
//! }
//!
//! let mut carousel = Carousel::new(CarouselConfig::default(), Box::new(NativePlayer {}));
//! carousel.replace_cards(vec![
//!     Card::new("m2", "Song B", "Artist").with_audio("https://clips/m2.mp3"),
//!     Card::new("m1", "Song A", "Artist").with_audio("https://clips/m1.mp3"),
//! ]);
//!
//! // Play button, then the player reports readiness
//! carousel.play().ok();
//! carousel.handle_audio_event(AudioEvent::Prepared { handle: ResourceHandle::new(1) });
//!
//! // Swipe left on the focused slot: playback stops, the next card comes forward
//! let focus_lane = carousel.buffer().map(|b| b.focus_lane()).unwrap_or_default();
//! carousel.handle_gesture(focus_lane, GestureEvent::end(-150.0, -900.0));
//!
//! for event in carousel.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

mod backend;
mod buffer;
mod carousel;
mod classifier;
mod coordinator;
mod error;
mod events;
mod gesture;
mod store;
pub mod types;

// Public exports
pub use backend::{authorize_url, AudioBackend, AudioEvent, ResourceHandle};
pub use buffer::{FocusOutcome, RotationBuffer, KEY_COPIES, VISUAL_LAYERS};
pub use carousel::Carousel;
pub use classifier::classify;
pub use coordinator::{AudioEventOutcome, PlaybackCoordinator};
pub use error::{CarouselError, Result};
pub use events::{CarouselEvent, PlaybackEvent};
pub use gesture::{GestureEvent, GestureInterpreter, GesturePhase};
pub use store::CardStore;
pub use types::{
    CarouselConfig, GestureThresholds, PlaybackSettings, PlaybackState, RotateCommand, RotationSlot,
    SlotLayout, SlotTransform, VisualRole,
};
