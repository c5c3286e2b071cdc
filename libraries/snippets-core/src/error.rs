/// Core error types for Snippets
use thiserror::Error;

use crate::types::ConversationId;

/// Result type alias using `SnippetsError`
pub type Result<T> = std::result::Result<T, SnippetsError>;

/// Core error type for Snippets
#[derive(Error, Debug)]
pub enum SnippetsError {
    /// Conversation not found upstream
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// Upstream feed failure (network, backend rejection)
    #[error("Feed error: {0}")]
    Feed(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl SnippetsError {
    /// Create a feed error
    pub fn feed(msg: impl Into<String>) -> Self {
        Self::Feed(msg.into())
    }
}
