//! Carousel events
//!
//! Event-based communication for UI synchronization. Events are queued as
//! they happen and drained by the host after each input:
//! - Card list changes (refresh, carousel hidden)
//! - Rotations and focus changes
//! - Playback state changes of the focused card
//! - Like toggles forwarded to the messaging layer

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};
use snippets_core::CardId;

/// Events emitted by the playback coordinator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// Card the coordinator is bound to (None when nothing is focused)
        card_id: Option<CardId>,
        /// The new state
        state: PlaybackState,
    },

    /// Clip played to its end; the resource has been released
    Finished {
        /// Card whose clip finished
        card_id: CardId,
    },

    /// Loading or playback failed; the resource has been released
    Failed {
        /// Card whose clip failed
        card_id: CardId,
        /// Backend message
        reason: String,
    },
}

/// Events emitted by the carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarouselEvent {
    /// A new card list was applied
    CardsReplaced {
        /// Number of cards
        count: usize,
        /// Whether the focused card survived the refresh
        focus_preserved: bool,
    },

    /// The card list became empty; nothing should be rendered
    CarouselHidden,

    /// The carousel rotated
    Rotated {
        /// Signed steps applied
        steps: i64,
        /// Offset after the rotation
        offset: i64,
    },

    /// A different card now occupies the focused slot
    FocusChanged {
        /// Newly focused card
        card_id: CardId,
        /// Previously focused card, if any
        previous: Option<CardId>,
    },

    /// Playback update for the focused card
    Playback(PlaybackEvent),

    /// User tapped the like button; persistence is up to the host
    LikeToggleRequested {
        /// Card to like or unlike
        card_id: CardId,
        /// Like state shown when the button was pressed
        currently_liked: bool,
    },
}

impl From<PlaybackEvent> for CarouselEvent {
    fn from(event: PlaybackEvent) -> Self {
        CarouselEvent::Playback(event)
    }
}
