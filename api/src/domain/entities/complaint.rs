//! Complaint entity
//!
//! Feedback that is anonymous to other users. Only admins see who posted it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComplaintId(pub Uuid);

impl From<Uuid> for ComplaintId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Complaint {
    pub id: ComplaintId,
    pub title: String,
    pub message: String,
    pub posted_by: UserId,
    pub posted_at: DateTime<Utc>,
    pub is_resolved: bool,
}

#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub title: String,
    pub message: String,
    pub posted_by: UserId,
}
