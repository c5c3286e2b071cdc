//! Error types for the carousel

use snippets_core::CardId;
use thiserror::Error;

/// Carousel errors
#[derive(Debug, Error)]
pub enum CarouselError {
    /// A carousel was requested for zero cards
    #[error("Cannot build a carousel without cards")]
    EmptyBuffer,

    /// Audio resource could not be prepared
    #[error("Audio resource failed to load: {0}")]
    ResourceLoad(String),

    /// Audio backend rejected a play/pause request
    #[error("Playback error: {0}")]
    Playback(String),

    /// No card is focused (carousel hidden)
    #[error("No focused card")]
    NoFocusedCard,

    /// The focused card carries no audio clip
    #[error("Card has no audio: {0}")]
    NoAudio(CardId),

    /// Card is not part of the current list
    #[error("Unknown card: {0}")]
    UnknownCard(CardId),
}

/// Result type for carousel operations
pub type Result<T> = std::result::Result<T, CarouselError>;
