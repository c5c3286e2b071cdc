//! Snippets Core
//!
//! Platform-agnostic domain types shared by every Snippets crate.
//!
//! A conversation is a stream of backend [`Message`] records. Each message
//! carries a short lyric snippet of a song; the UI renders them as [`Card`]s,
//! newest first, inside a rotating carousel.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `CardId`, `UserId`, `ConversationId`
//! - **Domain Types**: `Message`, `User`, `Card`, `Sender`
//! - **Conversion**: [`deck::cards_from_messages`] builds the card list shown on screen
//! - **Core Traits**: [`MessageFeed`], the upstream source the UI polls
//! - **Error Handling**: Unified `SnippetsError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use snippets_core::deck::{cards_from_messages, DeckOptions};
//! use snippets_core::types::Message;
//!
//! let messages: Vec<Message> = Vec::new();
//! let cards = cards_from_messages(&messages, &[], None, &DeckOptions::default());
//! assert!(cards.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deck;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SnippetsError};
pub use traits::MessageFeed;

pub use types::{Card, CardId, ConversationId, Message, Sender, User, UserId, MAX_LYRIC_LINES};
