//! Message → card conversion
//!
//! Turns a conversation's messages into the card list the carousel shows:
//! the most recent messages, newest first, with display fallbacks for every
//! optional column.

use chrono::{FixedOffset, Offset, Utc};

use crate::types::{email_local_part, find_sender, Card, Message, Sender, User, UserId};

const UNKNOWN_SONG: &str = "Unknown Song";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const NO_LYRICS: &str = "No lyrics available";
const COVER_PLACEHOLDER: &str = "https://api.dicebear.com/7.x/shapes/png?seed=";
const AVATAR_PLACEHOLDER: &str = "https://api.dicebear.com/7.x/avataaars/png?seed=";

/// Options for building a deck
#[derive(Debug, Clone)]
pub struct DeckOptions {
    /// Maximum number of cards (most recent messages win)
    pub max_cards: usize,

    /// Zone used to render `Card::sent_at`
    pub timezone: FixedOffset,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            max_cards: 5,
            timezone: Utc.fix(),
        }
    }
}

/// Build the card list for a conversation, newest first
///
/// `messages` may arrive in any order; they are ordered by `created_at`
/// (ties keep their input order) before the most recent `max_cards` are taken.
pub fn cards_from_messages(
    messages: &[Message],
    users: &[User],
    current_user: Option<&UserId>,
    options: &DeckOptions,
) -> Vec<Card> {
    let mut ordered: Vec<&Message> = messages.iter().collect();
    ordered.sort_by_key(|m| m.created_at);

    ordered
        .into_iter()
        .rev()
        .take(options.max_cards)
        .map(|m| card_from_message(m, users, current_user, options))
        .collect()
}

/// Build a single card from a message
pub fn card_from_message(
    message: &Message,
    users: &[User],
    current_user: Option<&UserId>,
    options: &DeckOptions,
) -> Card {
    let title = non_empty(message.song_title.as_deref()).unwrap_or(UNKNOWN_SONG);
    let artist = non_empty(message.artist.as_deref()).unwrap_or(UNKNOWN_ARTIST);

    let lyric_lines = if message.lyrics.is_empty() {
        vec![NO_LYRICS.to_string()]
    } else {
        message.lyrics.clone()
    };

    let album_cover_url = non_empty(message.album_cover.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{COVER_PLACEHOLDER}{title}"));

    let sent_at = message
        .created_at
        .with_timezone(&options.timezone)
        .format("%b %-d, %-I:%M %p")
        .to_string();

    Card {
        id: message.id.clone(),
        title: title.to_string(),
        artist: artist.to_string(),
        lyric_lines,
        album_cover_url,
        audio_url: message.audio_url.clone(),
        sender: sender_for(message, users),
        sent_at,
        like_count: message.like_count(),
        liked_by_current_user: current_user.is_some_and(|u| message.is_liked_by(u)),
    }
}

fn sender_for(message: &Message, users: &[User]) -> Sender {
    let directory = find_sender(users, &message.sender_id, &message.sender_email);

    let name = directory
        .and_then(|u| non_empty(u.display_name.as_deref()))
        .or_else(|| non_empty(message.sender_name.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| email_local_part(&message.sender_email).to_string());

    let avatar_url = directory
        .and_then(|u| non_empty(u.profile_image.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("{AVATAR_PLACEHOLDER}{}", message.sender_email));

    Sender {
        id: message.sender_id.clone(),
        name,
        avatar_url,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CardId, ConversationId};
    use chrono::TimeZone;

    fn message(id: &str, minute: u32) -> Message {
        Message {
            id: CardId::new(id),
            conversation_id: ConversationId::new("c1"),
            sender_id: UserId::new("u1"),
            sender_email: "alice@example.com".to_string(),
            sender_name: None,
            lyrics: vec!["first".to_string(), "second".to_string()],
            song_title: Some(format!("Song {id}")),
            artist: Some("Artist".to_string()),
            album_cover: Some("https://covers/1.png".to_string()),
            audio_url: None,
            spotify_id: None,
            created_at: Utc.with_ymd_and_hms(2025, 3, 5, 15, minute, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 3, 5, 15, minute, 0).unwrap(),
            likes: None,
            like_count: None,
        }
    }

    #[test]
    fn newest_first_and_capped() {
        let messages: Vec<Message> = (0..8).map(|i| message(&i.to_string(), i)).collect();
        let cards = cards_from_messages(&messages, &[], None, &DeckOptions::default());

        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "6", "5", "4", "3"]);
    }

    #[test]
    fn orders_by_created_at_not_input_order() {
        let messages = vec![message("late", 30), message("early", 1)];
        let cards = cards_from_messages(&messages, &[], None, &DeckOptions::default());

        assert_eq!(cards[0].id.as_str(), "late");
        assert_eq!(cards[1].id.as_str(), "early");
    }

    #[test]
    fn fallbacks_for_missing_columns() {
        let mut m = message("m", 7);
        m.song_title = None;
        m.artist = Some(String::new());
        m.lyrics.clear();
        m.album_cover = None;

        let card = card_from_message(&m, &[], None, &DeckOptions::default());
        assert_eq!(card.title, "Unknown Song");
        assert_eq!(card.artist, "Unknown Artist");
        assert_eq!(card.lyric_lines, vec!["No lyrics available".to_string()]);
        assert_eq!(
            card.album_cover_url,
            "https://api.dicebear.com/7.x/shapes/png?seed=Unknown Song"
        );
        assert_eq!(card.sender.name, "alice");
        assert_eq!(
            card.sender.avatar_url,
            "https://api.dicebear.com/7.x/avataaars/png?seed=alice@example.com"
        );
        assert_eq!(card.sent_at, "Mar 5, 3:07 PM");
    }

    #[test]
    fn sender_resolved_from_directory() {
        let mut alice = User::new("u1", "alice@example.com");
        alice.display_name = Some("Alice".to_string());
        alice.profile_image = Some("https://img/alice.png".to_string());

        let mut m = message("m", 0);
        m.sender_name = Some("alice-at-send-time".to_string());

        let card = card_from_message(&m, &[alice], None, &DeckOptions::default());
        assert_eq!(card.sender.name, "Alice");
        assert_eq!(card.sender.avatar_url, "https://img/alice.png");
    }

    #[test]
    fn sender_name_from_message_when_directory_misses() {
        let mut m = message("m", 0);
        m.sender_name = Some("Ally".to_string());

        let card = card_from_message(&m, &[], None, &DeckOptions::default());
        assert_eq!(card.sender.name, "Ally");
    }

    #[test]
    fn like_state_for_current_user() {
        let bob = UserId::new("bob");
        let mut m = message("m", 0);
        m.apply_like(&bob);

        let as_bob = card_from_message(&m, &[], Some(&bob), &DeckOptions::default());
        assert!(as_bob.liked_by_current_user);
        assert_eq!(as_bob.like_count, 1);

        let anonymous = card_from_message(&m, &[], None, &DeckOptions::default());
        assert!(!anonymous.liked_by_current_user);
    }

    #[test]
    fn timestamp_respects_timezone() {
        let options = DeckOptions {
            timezone: FixedOffset::west_opt(5 * 3600).unwrap(),
            ..Default::default()
        };
        let card = card_from_message(&message("m", 7), &[], None, &options);
        assert_eq!(card.sent_at, "Mar 5, 10:07 AM");
    }
}
