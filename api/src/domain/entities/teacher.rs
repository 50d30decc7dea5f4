//! Teacher directory entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherId(pub Uuid);

impl From<Uuid> for TeacherId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TeacherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A faculty contact in the directory
#[derive(Debug, Clone, Serialize)]
pub struct Teacher {
    pub id: TeacherId,
    pub name: String,
    pub phone: String,
    pub branch: String,
    pub email: Option<String>,
    pub designation: Option<String>,
}

/// Editable fields of a directory entry, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherDetails {
    pub name: String,
    pub phone: String,
    pub branch: String,
    pub email: Option<String>,
    pub designation: Option<String>,
}
