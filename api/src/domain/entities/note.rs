//! Shared study note entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NoteId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A study note. Private notes are visible to their author only.
#[derive(Debug, Clone, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub posted_by: UserId,
    pub posted_at: DateTime<Utc>,
    pub is_public: bool,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
}

impl Note {
    pub fn is_visible_to(&self, viewer: &UserId) -> bool {
        self.is_public || self.posted_by == *viewer
    }
}

#[derive(Debug, Clone)]
pub struct NewNote {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub posted_by: UserId,
    pub is_public: bool,
    pub file_path: Option<String>,
    pub file_type: Option<String>,
}
