/// Core traits for Snippets
use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ConversationId, Message, User};

/// Upstream source of conversation messages
///
/// The UI polls this periodically and replaces its card list with whatever
/// comes back. Transport and cadence belong to the implementor; callers only
/// rely on each call returning a complete, ascending-by-`created_at` list.
#[async_trait]
pub trait MessageFeed: Send + Sync {
    /// Fetch every message of a conversation
    ///
    /// # Errors
    /// Returns an error if the conversation cannot be fetched
    async fn conversation_messages(&self, conversation: &ConversationId) -> Result<Vec<Message>>;

    /// Fetch the user directory used to resolve sender names and avatars
    ///
    /// Defaults to an empty directory, in which case cards fall back to the
    /// data carried by each message.
    async fn users(&self) -> Result<Vec<User>> {
        Ok(Vec::new())
    }
}
