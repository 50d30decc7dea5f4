//! Community message board entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for MessageId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A post on the message board. At least one of `content` or `file_path` is set.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub content: Option<String>,
    /// Stored name under the `messages` upload directory
    pub file_path: Option<String>,
    /// Lowercase extension of the attachment
    pub file_type: Option<String>,
    pub posted_by: UserId,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub id: MessageId,
    pub content: Option<String>,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
    pub posted_by: UserId,
}
