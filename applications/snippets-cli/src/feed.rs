/// File-backed message feed
///
/// Stands in for the messaging backend: the whole JSON file is re-read on
/// every poll, so editing it while `watch` runs behaves like new messages
/// arriving.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use snippets_core::{ConversationId, Message, MessageFeed, Result, SnippetsError, User};
use std::path::{Path, PathBuf};

/// On-disk layout of a feed file
///
/// A conversation exists when it is listed in `conversations` or any message
/// belongs to it, so a chat whose messages were all deleted stays known.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFile {
    #[serde(default)]
    pub conversations: Vec<ConversationId>,

    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole file
    pub async fn read(&self) -> Result<FeedFile> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SnippetsError::feed(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// First listed conversation, else the conversation of the first message
    pub async fn default_conversation(&self) -> Result<ConversationId> {
        let file = self.read().await?;
        file.conversations
            .first()
            .or_else(|| file.messages.first().map(|m| &m.conversation_id))
            .cloned()
            .ok_or_else(|| {
                SnippetsError::feed(format!("{} has no conversations", self.path.display()))
            })
    }
}

impl FeedFile {
    pub fn has_conversation(&self, conversation: &ConversationId) -> bool {
        self.conversations.contains(conversation)
            || self
                .messages
                .iter()
                .any(|m| &m.conversation_id == conversation)
    }
}

#[async_trait]
impl MessageFeed for JsonFileFeed {
    async fn conversation_messages(&self, conversation: &ConversationId) -> Result<Vec<Message>> {
        let file = self.read().await?;
        if !file.has_conversation(conversation) {
            return Err(SnippetsError::ConversationNotFound(conversation.clone()));
        }

        Ok(file
            .messages
            .into_iter()
            .filter(|m| &m.conversation_id == conversation)
            .collect())
    }

    async fn users(&self) -> Result<Vec<User>> {
        Ok(self.read().await?.users)
    }
}
