/// Card domain type
use serde::{Deserialize, Serialize};

use crate::types::{CardId, UserId};

/// Number of lyric lines a card shows
pub const MAX_LYRIC_LINES: usize = 3;

/// Who sent a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    /// Sender account id
    pub id: UserId,

    /// Name shown on the card header
    pub name: String,

    /// Avatar image URL
    pub avatar_url: String,
}

/// One exchanged lyric snippet, ready for display
///
/// Built from a backend message and never mutated afterwards: when the
/// conversation changes the whole card list is replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Originating message id
    pub id: CardId,

    /// Song title
    pub title: String,

    /// Song artist
    pub artist: String,

    /// Lyric lines in order
    pub lyric_lines: Vec<String>,

    /// Album art
    pub album_cover_url: String,

    /// Audio clip, if the sender attached one
    pub audio_url: Option<String>,

    /// Sender metadata
    pub sender: Sender,

    /// Human-readable send time, e.g. `Mar 5, 3:07 PM`
    pub sent_at: String,

    /// Total likes
    pub like_count: u32,

    /// Whether the viewing user has liked this card
    pub liked_by_current_user: bool,
}

impl Card {
    /// Minimal card, mostly useful for tests and demos
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            title: title.into(),
            artist: artist.into(),
            lyric_lines: Vec::new(),
            album_cover_url: String::new(),
            audio_url: None,
            sender: Sender {
                id: UserId::new(""),
                name: String::new(),
                avatar_url: String::new(),
            },
            sent_at: String::new(),
            like_count: 0,
            liked_by_current_user: false,
        }
    }

    /// Attach an audio clip
    pub fn with_audio(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Set the lyric lines
    pub fn with_lyrics<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lyric_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Playable audio URL; empty strings count as no audio
    pub fn playable_audio(&self) -> Option<&str> {
        self.audio_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Exactly [`MAX_LYRIC_LINES`] lines: the first ones, padded with blanks
    pub fn visible_lyrics(&self) -> [&str; MAX_LYRIC_LINES] {
        let mut lines = [""; MAX_LYRIC_LINES];
        for (slot, line) in lines.iter_mut().zip(&self.lyric_lines) {
            *slot = line.as_str();
        }
        lines
    }

    /// `Title - Artist` caption
    pub fn caption(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_lyrics_truncates_and_pads() {
        let long = Card::new("1", "t", "a").with_lyrics(["a", "b", "c", "d"]);
        assert_eq!(long.visible_lyrics(), ["a", "b", "c"]);

        let short = Card::new("2", "t", "a").with_lyrics(["only"]);
        assert_eq!(short.visible_lyrics(), ["only", "", ""]);
    }

    #[test]
    fn blank_audio_url_is_not_playable() {
        assert_eq!(Card::new("1", "t", "a").playable_audio(), None);
        assert_eq!(Card::new("1", "t", "a").with_audio("  ").playable_audio(), None);
        assert_eq!(
            Card::new("1", "t", "a").with_audio("https://x/a.mp3").playable_audio(),
            Some("https://x/a.mp3")
        );
    }

    #[test]
    fn caption_joins_title_and_artist() {
        assert_eq!(Card::new("1", "Hey Jude", "The Beatles").caption(), "Hey Jude - The Beatles");
    }
}
