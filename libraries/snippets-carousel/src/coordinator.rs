//! Playback coordinator - focused-card audio lifecycle
//!
//! Owns at most one audio resource, always bound to the focused card.
//!
//! ```text
//!            play / preload                 Prepared
//!   Idle ─────────────────────▶ Loading ─────────────────▶ Ready
//!    ▲                            │ LoadFailed               │ play
//!    │                            ▼                          ▼
//!    │                         Failed ◀──── play error ──── Playing ◀──┐
//!    │                                                       │  │      │ play
//!    │   Finished (resource released)                        │  │ pause│
//!    └───────────────────────────────────────────────────────┘  ▼      │
//!                                                             Paused ──┘
//! ```
//!
//! Whenever focus moves to another card every non-idle state collapses to
//! `Idle`: playing audio is paused first, then the resource is released. A
//! load still in flight is released too, and its late completion is discarded
//! because its handle no longer matches.

use crate::backend::{authorize_url, AudioBackend, AudioEvent, ResourceHandle};
use crate::error::{CarouselError, Result};
use crate::events::PlaybackEvent;
use crate::types::{PlaybackSettings, PlaybackState};
use snippets_core::{Card, CardId};
use tracing::{debug, info, warn};

/// What the coordinator did with an audio event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEventOutcome {
    /// Event advanced the state machine
    Applied,

    /// Event belongs to the live resource but has no effect in the current state
    Ignored,

    /// Event refers to a resource that was already released
    DiscardedStale,
}

/// Card the coordinator is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    card_id: CardId,
    audio_url: Option<String>,
}

/// Focused-card playback state machine
pub struct PlaybackCoordinator {
    backend: Box<dyn AudioBackend>,
    settings: PlaybackSettings,

    state: PlaybackState,
    binding: Option<Binding>,

    /// Live resource; `Some` exactly when `state.holds_resource()`
    resource: Option<ResourceHandle>,

    /// Start playing as soon as the pending load completes
    play_when_ready: bool,

    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackCoordinator {
    /// Create a coordinator on top of a platform backend
    pub fn new(backend: Box<dyn AudioBackend>, settings: PlaybackSettings) -> Self {
        Self {
            backend,
            settings,
            state: PlaybackState::Idle,
            binding: None,
            resource: None,
            play_when_ready: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Focus =====

    /// Attach to the newly focused card (None when the carousel is hidden)
    ///
    /// Re-focusing the same card with the same audio is a no-op, so feed
    /// refreshes never interrupt playback.
    pub fn focus(&mut self, card: Option<&Card>) {
        let next = card.map(|c| Binding {
            card_id: c.id.clone(),
            audio_url: c.playable_audio().map(str::to_string),
        });

        if next == self.binding {
            return;
        }

        self.teardown();
        self.binding = next;

        if let Some(binding) = &self.binding {
            debug!(card = %binding.card_id, has_audio = binding.audio_url.is_some(), "playback bound");
        }

        if self.settings.preload_on_focus && self.has_audio() {
            self.start_load(false);
        }
    }

    // ===== Controls =====

    /// Play the focused card's clip
    ///
    /// Loads it first if needed (playback starts once loading completes).
    /// Backend failures land in `Failed` rather than being returned.
    ///
    /// # Errors
    /// `NoFocusedCard` when nothing is focused, `NoAudio` when the focused card has no clip.
    pub fn play(&mut self) -> Result<()> {
        let binding = self.binding.as_ref().ok_or(CarouselError::NoFocusedCard)?;
        if binding.audio_url.is_none() {
            return Err(CarouselError::NoAudio(binding.card_id.clone()));
        }

        match self.state {
            PlaybackState::Idle | PlaybackState::Finished | PlaybackState::Failed(_) => {
                self.start_load(true);
            }
            PlaybackState::Loading => self.play_when_ready = true,
            PlaybackState::Ready | PlaybackState::Paused => self.start_playback(),
            PlaybackState::Playing => {}
        }

        Ok(())
    }

    /// Pause playback
    ///
    /// While loading, this cancels a pending "play when ready".
    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                let Some(handle) = self.resource else {
                    return;
                };
                match self.backend.pause(handle) {
                    Ok(()) => self.set_state(PlaybackState::Paused),
                    Err(e) => self.fail(e.to_string()),
                }
            }
            PlaybackState::Loading => self.play_when_ready = false,
            _ => {}
        }
    }

    /// Play if not playing, pause otherwise
    ///
    /// # Errors
    /// Same as [`play`](Self::play).
    pub fn toggle(&mut self) -> Result<()> {
        if self.state.is_playing() || (self.state == PlaybackState::Loading && self.play_when_ready) {
            self.pause();
            Ok(())
        } else {
            self.play()
        }
    }

    // ===== Backend notifications =====

    /// Apply an asynchronous notification from the backend
    ///
    /// Events for any handle other than the live one are stale (focus moved
    /// while the backend was working) and are silently discarded.
    pub fn handle_audio_event(&mut self, event: AudioEvent) -> AudioEventOutcome {
        if self.resource != Some(event.handle()) {
            debug!(handle = event.handle().raw(), ?event, "discarding stale audio event");
            return AudioEventOutcome::DiscardedStale;
        }

        let loading = self.state == PlaybackState::Loading;
        let started = matches!(self.state, PlaybackState::Playing | PlaybackState::Paused);

        match event {
            AudioEvent::Prepared { .. } if loading => {
                self.set_state(PlaybackState::Ready);
                if self.play_when_ready {
                    self.start_playback();
                }
                AudioEventOutcome::Applied
            }
            AudioEvent::LoadFailed { reason, .. } if loading => {
                self.fail(CarouselError::ResourceLoad(reason).to_string());
                AudioEventOutcome::Applied
            }
            AudioEvent::Finished { .. } if started => {
                self.finish();
                AudioEventOutcome::Applied
            }
            AudioEvent::PlaybackFailed { reason, .. } => {
                self.fail(CarouselError::Playback(reason).to_string());
                AudioEventOutcome::Applied
            }
            _ => AudioEventOutcome::Ignored,
        }
    }

    // ===== Queries =====

    /// Current state
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Card the coordinator is bound to
    pub fn bound_card(&self) -> Option<&CardId> {
        self.binding.as_ref().map(|b| &b.card_id)
    }

    /// Whether the bound card has a playable clip
    pub fn has_audio(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.audio_url.is_some())
    }

    /// Live resource handle, if any
    pub fn active_resource(&self) -> Option<ResourceHandle> {
        self.resource
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // ===== Internal =====

    fn start_load(&mut self, play_when_ready: bool) {
        let Some(url) = self.binding.as_ref().and_then(|b| b.audio_url.as_deref()) else {
            return;
        };
        let url = authorize_url(url, self.settings.audio_api_key.as_deref());

        // Exclusivity: never hold two resources
        self.release_resource();

        match self.backend.prepare(&url) {
            Ok(handle) => {
                self.resource = Some(handle);
                self.play_when_ready = play_when_ready;
                self.set_state(PlaybackState::Loading);
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn start_playback(&mut self) {
        let Some(handle) = self.resource else {
            return;
        };
        self.play_when_ready = false;

        match self.backend.play(handle) {
            Ok(()) => self.set_state(PlaybackState::Playing),
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn finish(&mut self) {
        self.release_resource();
        self.set_state(PlaybackState::Finished);
        if let Some(binding) = &self.binding {
            self.pending_events.push(PlaybackEvent::Finished {
                card_id: binding.card_id.clone(),
            });
        }
        self.set_state(PlaybackState::Idle);
    }

    fn fail(&mut self, reason: String) {
        warn!(card = ?self.bound_card(), %reason, "playback failed");

        self.release_resource();
        if let Some(binding) = &self.binding {
            self.pending_events.push(PlaybackEvent::Failed {
                card_id: binding.card_id.clone(),
                reason: reason.clone(),
            });
        }
        self.set_state(PlaybackState::Failed(reason));
    }

    /// Pause (if playing) then release, and return to `Idle`
    fn teardown(&mut self) {
        if self.state.is_playing() {
            if let Some(handle) = self.resource {
                if let Err(e) = self.backend.pause(handle) {
                    warn!(error = %e, "pause during teardown failed");
                }
            }
        }
        self.release_resource();
        self.set_state(PlaybackState::Idle);
    }

    fn release_resource(&mut self) {
        self.play_when_ready = false;
        if let Some(handle) = self.resource.take() {
            self.backend.release(handle);
        }
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }

        info!(card = ?self.bound_card(), from = ?self.state, to = ?state, "playback state");
        self.state = state.clone();
        self.pending_events.push(PlaybackEvent::StateChanged {
            card_id: self.bound_card().cloned(),
            state,
        });
    }
}

impl Drop for PlaybackCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("state", &self.state)
            .field("binding", &self.binding)
            .field("resource", &self.resource)
            .field("play_when_ready", &self.play_when_ready)
            .finish_non_exhaustive()
    }
}
