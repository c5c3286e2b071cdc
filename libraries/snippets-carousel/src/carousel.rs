//! Carousel - the component the host drives
//!
//! Ties the card store, rotation buffer, gesture interpreter and playback
//! coordinator together. The host feeds it inputs (refreshes, gestures,
//! taps, play/pause, backend notifications), renders [`Carousel::window`],
//! and drains [`CarouselEvent`]s after each input.

use crate::backend::{AudioBackend, AudioEvent};
use crate::buffer::RotationBuffer;
use crate::coordinator::{AudioEventOutcome, PlaybackCoordinator};
use crate::error::{CarouselError, Result};
use crate::events::CarouselEvent;
use crate::gesture::{GestureEvent, GestureInterpreter};
use crate::store::CardStore;
use crate::types::{CarouselConfig, PlaybackState, RotateCommand, RotationSlot, SlotTransform};
use snippets_core::{Card, CardId};
use tracing::{debug, info, warn};

/// Rotating stack of song cards with focused-card playback
pub struct Carousel {
    config: CarouselConfig,
    store: CardStore,

    /// None while the card list is empty (carousel hidden)
    buffer: Option<RotationBuffer>,

    gestures: GestureInterpreter,
    playback: PlaybackCoordinator,

    /// Card in the focused slot, as last reported
    focused: Option<CardId>,

    pending_events: Vec<CarouselEvent>,
}

impl Carousel {
    /// Create a hidden carousel; it appears with the first non-empty refresh
    pub fn new(config: CarouselConfig, backend: Box<dyn AudioBackend>) -> Self {
        let gestures = GestureInterpreter::new(config.gesture);
        let playback = PlaybackCoordinator::new(backend, config.playback.clone());

        Self {
            config,
            store: CardStore::new(),
            buffer: None,
            gestures,
            playback,
            focused: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Card list =====

    /// Apply a new newest-first card list from the feed
    ///
    /// The focused card stays focused (and keeps playing) if it is still in
    /// the list; otherwise focus resets to the newest card. An empty list
    /// hides the carousel and stops playback. Returns false when the list
    /// did not change.
    pub fn replace_cards(&mut self, cards: Vec<Card>) -> bool {
        if !self.store.replace(cards) {
            return false;
        }

        let snapshot = self.store.snapshot();
        if snapshot.is_empty() {
            if self.buffer.take().is_some() {
                info!("card list empty, hiding carousel");
                self.pending_events.push(CarouselEvent::CarouselHidden);
            }
            self.sync_focus();
            return true;
        }

        let focus_preserved = match self.buffer.as_mut() {
            Some(buffer) => match buffer.replace_cards(snapshot) {
                Ok(outcome) => outcome.is_preserved(),
                Err(e) => {
                    // Unreachable with a non-empty snapshot
                    warn!(error = %e, "rejected card list");
                    return false;
                }
            },
            None => match RotationBuffer::initialize(snapshot) {
                Ok(buffer) => {
                    self.buffer = Some(buffer);
                    false
                }
                Err(e) => {
                    warn!(error = %e, "rejected card list");
                    return false;
                }
            },
        };

        info!(
            count = self.store.len(),
            revision = self.store.revision(),
            focus_preserved,
            "cards replaced"
        );
        self.pending_events.push(CarouselEvent::CardsReplaced {
            count: self.store.len(),
            focus_preserved,
        });

        self.sync_focus();
        true
    }

    /// Current card list
    pub fn cards(&self) -> &[Card] {
        self.store.cards()
    }

    /// Number of distinct cards
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether there are no cards
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether nothing should be rendered
    pub fn is_hidden(&self) -> bool {
        self.buffer.is_none()
    }

    // ===== Rotation =====

    /// Rotate by `steps` (positive = next, negative = previous)
    ///
    /// Ignored while hidden, with a single card, or for zero steps. Returns
    /// whether the carousel rotated.
    pub fn rotate(&mut self, steps: i64) -> bool {
        let Some(buffer) = self.buffer.as_mut() else {
            return false;
        };
        if buffer.len() < 2 || steps == 0 {
            return false;
        }

        let offset = buffer.rotate(steps);
        self.pending_events.push(CarouselEvent::Rotated { steps, offset });

        self.sync_focus();
        true
    }

    /// Apply a discrete rotate command
    pub fn apply(&mut self, command: RotateCommand) -> bool {
        self.rotate(command.steps())
    }

    /// Feed a drag event for the slot rendered in `lane`
    ///
    /// Only drags on the focused slot count. Returns the command that was
    /// applied, if any.
    pub fn handle_gesture(&mut self, lane: usize, event: GestureEvent) -> Option<RotateCommand> {
        if self.buffer.as_ref()?.focus_lane() != lane {
            return None;
        }

        let command = self.gestures.on_event(event, self.config.layout.card_width);
        if let Some(command) = command {
            debug!(?command, translation = event.translation, velocity = event.velocity, "drag recognized");
        }

        command.filter(|c| self.apply(*c))
    }

    /// Tap the slot rendered in `lane`
    ///
    /// Tapping any other slot jumps straight to it, by its signed distance
    /// from the focus lane. Tapping the focused slot does nothing.
    pub fn tap(&mut self, lane: usize) -> Option<RotateCommand> {
        let buffer = self.buffer.as_ref()?;
        if lane >= buffer.window_len() {
            return None;
        }

        let distance = lane as i64 - buffer.focus_lane() as i64;
        self.gestures.tap(distance).filter(|c| self.apply(*c))
    }

    // ===== Rendering =====

    /// Slots to render, ordered by lane (empty while hidden)
    pub fn window(&self) -> Vec<RotationSlot<'_>> {
        self.buffer
            .as_ref()
            .map(RotationBuffer::current_window)
            .unwrap_or_default()
    }

    /// Placement for a slot of the current window
    pub fn transform(&self, slot: &RotationSlot<'_>) -> SlotTransform {
        self.config.layout.transform(slot.role, self.len())
    }

    /// The focused card
    pub fn focused_card(&self) -> Option<&Card> {
        self.buffer.as_ref().map(RotationBuffer::focused_card)
    }

    /// Rotation buffer, if visible
    pub fn buffer(&self) -> Option<&RotationBuffer> {
        self.buffer.as_ref()
    }

    /// Active configuration
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    // ===== Playback =====

    /// Play the focused card's clip
    ///
    /// # Errors
    /// `NoFocusedCard` while hidden, `NoAudio` when the focused card has no clip.
    pub fn play(&mut self) -> Result<()> {
        let result = self.playback.play();
        self.flush_playback();
        result
    }

    /// Pause the focused card's clip
    pub fn pause(&mut self) {
        self.playback.pause();
        self.flush_playback();
    }

    /// Play/pause button
    ///
    /// # Errors
    /// Same as [`play`](Self::play).
    pub fn toggle_playback(&mut self) -> Result<()> {
        let result = self.playback.toggle();
        self.flush_playback();
        result
    }

    /// Playback state of the focused card
    pub fn playback_state(&self) -> &PlaybackState {
        self.playback.state()
    }

    /// Playback coordinator
    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }

    /// Forward an asynchronous backend notification
    pub fn handle_audio_event(&mut self, event: AudioEvent) -> AudioEventOutcome {
        let outcome = self.playback.handle_audio_event(event);
        self.flush_playback();
        outcome
    }

    // ===== Likes =====

    /// Like button on a card
    ///
    /// The carousel only reports the request; the host persists it and the
    /// updated count arrives with the next refresh.
    ///
    /// # Errors
    /// `UnknownCard` if the card is not in the current list.
    pub fn toggle_like(&mut self, card_id: &CardId) -> Result<()> {
        let card = self
            .store
            .get(card_id)
            .ok_or_else(|| CarouselError::UnknownCard(card_id.clone()))?;

        self.pending_events.push(CarouselEvent::LikeToggleRequested {
            card_id: card.id.clone(),
            currently_liked: card.liked_by_current_user,
        });
        Ok(())
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        self.flush_playback();
        std::mem::take(&mut self.pending_events)
    }

    fn flush_playback(&mut self) {
        self.pending_events
            .extend(self.playback.drain_events().into_iter().map(CarouselEvent::from));
    }

    /// Report focus moves and rebind playback to the focused card
    fn sync_focus(&mut self) {
        let card = self.buffer.as_ref().map(RotationBuffer::focused_card);
        let current = card.map(|c| c.id.clone());

        if current != self.focused {
            if let Some(card_id) = &current {
                debug!(card = %card_id, previous = ?self.focused, "focus changed");
                self.pending_events.push(CarouselEvent::FocusChanged {
                    card_id: card_id.clone(),
                    previous: self.focused.clone(),
                });
            }
            self.focused = current;
        }

        self.playback.focus(card);
        self.flush_playback();
    }
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("cards", &self.store.len())
            .field("buffer", &self.buffer)
            .field("focused", &self.focused)
            .field("playback", &self.playback)
            .finish_non_exhaustive()
    }
}
