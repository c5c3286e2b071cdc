//! Current card list
//!
//! Holds the newest-first cards supplied by the upstream feed. The list is
//! shared with the rotation buffer by reference count, so a refresh costs one
//! allocation no matter how many components look at it.

use snippets_core::{Card, CardId};
use std::sync::Arc;

/// Value holder for the card list
#[derive(Debug, Clone)]
pub struct CardStore {
    cards: Arc<[Card]>,

    /// Bumped on every change
    revision: u64,
}

impl CardStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            cards: Arc::from(Vec::new()),
            revision: 0,
        }
    }

    /// Replace the whole list
    ///
    /// Returns false (and keeps the revision) when the new list is identical,
    /// which is the common case for a polling feed.
    pub fn replace(&mut self, cards: Vec<Card>) -> bool {
        if *self.cards == *cards {
            return false;
        }

        self.cards = Arc::from(cards);
        self.revision += 1;
        true
    }

    /// Shared handle to the current list
    pub fn snapshot(&self) -> Arc<[Card]> {
        Arc::clone(&self.cards)
    }

    /// Current list
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card by id
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Change counter
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new()
    }
}
