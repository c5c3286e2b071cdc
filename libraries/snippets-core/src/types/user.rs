/// User directory entry
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A registered account as returned by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Account e-mail (also used as a participant key)
    pub email: String,

    /// Display name chosen by the user
    #[serde(default)]
    pub display_name: Option<String>,

    /// Profile image URL
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl User {
    /// Create a user with only the mandatory fields
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            email: email.into(),
            display_name: None,
            profile_image: None,
        }
    }
}

/// Directory entry for a message sender, matched by id or e-mail
pub(crate) fn find_sender<'a>(users: &'a [User], id: &UserId, email: &str) -> Option<&'a User> {
    users.iter().find(|u| &u.id == id || u.email == email)
}

/// Part of an e-mail address before the `@`
pub(crate) fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}
