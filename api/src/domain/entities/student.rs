//! Student roster entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a roster entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudentId(pub Uuid);

impl From<Uuid> for StudentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A student on the attendance roster
#[derive(Debug, Clone, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub branch: String,
    pub year: i32,
    pub roll_number: String,
}

/// Editable fields of a roster entry, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    pub name: String,
    pub branch: String,
    pub year: i32,
    pub roll_number: String,
}
