//! Seamlessly looping rotation buffer
//!
//! The carousel renders `VISUAL_LAYERS × n` lanes for `n` cards: one layer of
//! parked-left lanes (exit animations), one layer for the focused card and the
//! stack behind it, and one layer of parked-right lanes (entry animations).
//!
//! ```text
//! lane:    0 .. n-1 | n       | n+1 .. 2n-1 | 2n .. 3n-1
//! role:    OffLeft  | Focused | Receding    | OffRight
//! ```
//!
//! Instead of materialising duplicate copies of the card list, lanes map to
//! cards by modular arithmetic: lane `i` shows card `(i + offset) mod n`. Each
//! lane also carries an animation key `(i + offset) mod (KEY_COPIES × n)` that
//! travels with the card as it rotates, which is what lets the renderer keep a
//! slot mounted while it slides from right to focus to left.

use crate::classifier::classify;
use crate::error::{CarouselError, Result};
use crate::types::RotationSlot;
use snippets_core::{Card, CardId};
use std::sync::Arc;
use tracing::debug;

/// Rendered layers (left, centre, right)
pub const VISUAL_LAYERS: usize = 3;

/// Logical copies backing the animation keys
///
/// One more than the rendered layers, so a key leaving on the right never
/// collides with one entering on the left within a single rotation.
pub const KEY_COPIES: usize = 4;

/// Where focus landed after the card list was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Previously focused card still present, now at this index
    Preserved(usize),

    /// Previously focused card gone; focus reset to the first card
    Reset,
}

impl FocusOutcome {
    /// Whether the same card is still focused
    pub fn is_preserved(&self) -> bool {
        matches!(self, FocusOutcome::Preserved(_))
    }
}

/// Circular view over a non-empty card list
#[derive(Debug, Clone)]
pub struct RotationBuffer {
    cards: Arc<[Card]>,

    /// Rotation accumulator, kept reduced modulo the key period
    offset: i64,

    /// Steps applied by the most recent rotation (0 after a rebuild)
    last_step: i64,
}

impl RotationBuffer {
    /// Build a buffer focused on the first card
    ///
    /// # Errors
    /// `EmptyBuffer` if `cards` is empty; callers should not render a carousel then.
    pub fn initialize(cards: impl Into<Arc<[Card]>>) -> Result<Self> {
        let cards = cards.into();
        if cards.is_empty() {
            return Err(CarouselError::EmptyBuffer);
        }

        Ok(Self {
            cards,
            offset: 0,
            last_step: 0,
        })
    }

    /// Number of distinct cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; an empty buffer cannot be built
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card list in newest-first order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current rotation offset
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Steps applied by the most recent rotation
    pub fn last_step(&self) -> i64 {
        self.last_step
    }

    /// Number of rendered lanes
    pub fn window_len(&self) -> usize {
        VISUAL_LAYERS * self.len()
    }

    /// Lane that holds the focused card
    pub fn focus_lane(&self) -> usize {
        self.len()
    }

    /// Index of the focused card in the card list
    pub fn focus_index(&self) -> usize {
        self.card_index(self.focus_lane())
    }

    /// The focused card
    pub fn focused_card(&self) -> &Card {
        &self.cards[self.focus_index()]
    }

    /// Card shown in `lane`
    pub fn card_at_lane(&self, lane: usize) -> &Card {
        &self.cards[self.card_index(lane)]
    }

    /// Rotate by `steps` (positive = next, negative = previous)
    ///
    /// Only the offset changes; card data is untouched. Returns the new offset.
    pub fn rotate(&mut self, steps: i64) -> i64 {
        let period = self.key_period();
        self.offset = (self.offset + steps.rem_euclid(period)).rem_euclid(period);
        self.last_step = steps;

        debug!(
            steps,
            offset = self.offset,
            focus = %self.focused_card().id,
            "rotated carousel"
        );

        self.offset
    }

    /// Slots to render for the current offset, ordered by lane
    pub fn current_window(&self) -> Vec<RotationSlot<'_>> {
        let n = self.len();
        let focus_lane = self.focus_lane();
        let period = self.key_period();

        (0..self.window_len())
            .map(|lane| {
                let (role, weight) = classify(lane, focus_lane, n);
                RotationSlot {
                    card: self.card_at_lane(lane),
                    linear_index: lane,
                    animation_key: (lane as i64 + self.offset).rem_euclid(period) as usize,
                    role,
                    weight,
                }
            })
            .collect()
    }

    /// Swap in a new card list, keeping the same card focused when possible
    ///
    /// # Errors
    /// `EmptyBuffer` if `cards` is empty; the buffer is left unchanged.
    pub fn replace_cards(&mut self, cards: impl Into<Arc<[Card]>>) -> Result<FocusOutcome> {
        let cards = cards.into();
        if cards.is_empty() {
            return Err(CarouselError::EmptyBuffer);
        }

        let focused: CardId = self.focused_card().id.clone();
        let outcome = match cards.iter().position(|c| c.id == focused) {
            Some(index) => FocusOutcome::Preserved(index),
            None => FocusOutcome::Reset,
        };

        self.cards = cards;
        self.last_step = 0;
        self.offset = match outcome {
            FocusOutcome::Preserved(index) => index as i64,
            FocusOutcome::Reset => 0,
        };

        debug!(?outcome, cards = self.len(), "card list replaced");

        Ok(outcome)
    }

    fn card_index(&self, lane: usize) -> usize {
        (lane as i64 + self.offset).rem_euclid(self.len() as i64) as usize
    }

    fn key_period(&self) -> i64 {
        (KEY_COPIES * self.len()) as i64
    }
}
