mod card;
mod ids;
mod message;
mod user;

pub use card::{Card, Sender, MAX_LYRIC_LINES};
pub use ids::{CardId, ConversationId, UserId};
pub use message::Message;
pub use user::User;
pub(crate) use user::{email_local_part, find_sender};
