/// Backend message record
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CardId, ConversationId, UserId};

/// One lyric snippet sent into a conversation
///
/// Mirrors the `messages` table row. Optional columns stay optional here;
/// display fallbacks are applied when a message is turned into a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Message id (becomes the card id)
    pub id: CardId,

    /// Conversation the message belongs to
    pub conversation_id: ConversationId,

    /// Sender account id
    pub sender_id: UserId,

    /// Sender e-mail
    pub sender_email: String,

    /// Sender name captured at send time
    #[serde(default)]
    pub sender_name: Option<String>,

    /// Lyric lines picked by the sender
    #[serde(default)]
    pub lyrics: Vec<String>,

    /// Song title
    #[serde(default)]
    pub song_title: Option<String>,

    /// Song artist
    #[serde(default)]
    pub artist: Option<String>,

    /// Album cover URL
    #[serde(default)]
    pub album_cover: Option<String>,

    /// Optional audio clip (preview or synthesized voice)
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Spotify track id
    #[serde(default)]
    pub spotify_id: Option<String>,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last update time
    pub updated_at: DateTime<Utc>,

    /// Users who liked the message
    #[serde(default)]
    pub likes: Option<Vec<UserId>>,

    /// Total number of likes
    #[serde(default)]
    pub like_count: Option<u32>,
}

impl Message {
    /// Users who liked this message
    pub fn likes(&self) -> &[UserId] {
        self.likes.as_deref().unwrap_or(&[])
    }

    /// Like count, zero when the column is empty
    pub fn like_count(&self) -> u32 {
        self.like_count.unwrap_or(0)
    }

    /// Whether `user` has liked this message
    pub fn is_liked_by(&self, user: &UserId) -> bool {
        self.likes().contains(user)
    }

    /// Record a like from `user`
    ///
    /// Idempotent: a second like from the same user changes nothing.
    /// Returns true if the message changed.
    pub fn apply_like(&mut self, user: &UserId) -> bool {
        if self.is_liked_by(user) {
            return false;
        }

        self.likes.get_or_insert_with(Vec::new).push(user.clone());
        self.like_count = Some(self.like_count().saturating_add(1));
        true
    }

    /// Withdraw a like from `user`
    ///
    /// Returns true if the message changed. The count never drops below zero.
    pub fn apply_unlike(&mut self, user: &UserId) -> bool {
        let Some(likes) = self.likes.as_mut() else {
            return false;
        };
        let Some(pos) = likes.iter().position(|u| u == user) else {
            return false;
        };

        likes.remove(pos);
        self.like_count = Some(self.like_count().saturating_sub(1));
        true
    }
}
