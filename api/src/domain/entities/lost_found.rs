//! Lost & found entities
//!
//! A post reporting a lost or found item, with up to three images.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Maximum number of images attached to one post
pub const MAX_IMAGES_PER_POST: usize = 3;

/// Unique identifier for a lost & found post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LostFoundId(pub Uuid);

impl LostFoundId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LostFoundId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LostFoundId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LostFoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemType::Lost => write!(f, "lost"),
            ItemType::Found => write!(f, "found"),
        }
    }
}

impl std::str::FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lost" => Ok(ItemType::Lost),
            "found" => Ok(ItemType::Found),
            _ => Err(format!("Unknown item type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LostFoundImage {
    pub id: Uuid,
    pub post_id: LostFoundId,
    /// Stored name under the `lost_found` upload directory
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LostFoundPost {
    pub id: LostFoundId,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub posted_by: UserId,
    pub posted_at: DateTime<Utc>,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub date_occurred: Option<NaiveDate>,
    pub is_resolved: bool,
    pub images: Vec<LostFoundImage>,
}

/// Data for a new post. The id is chosen up front so that stored image
/// names can reference it before the row exists.
#[derive(Debug, Clone)]
pub struct NewLostFoundPost {
    pub id: LostFoundId,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub posted_by: UserId,
    pub contact_info: Option<String>,
    pub location: Option<String>,
    pub date_occurred: Option<NaiveDate>,
    pub image_filenames: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_from_str() {
        assert_eq!("lost".parse::<ItemType>().unwrap(), ItemType::Lost);
        assert_eq!("Found".parse::<ItemType>().unwrap(), ItemType::Found);
        assert!("stolen".parse::<ItemType>().is_err());
    }

    #[test]
    fn item_type_serializes_lowercase() {
        let json = serde_json::to_string(&ItemType::Found).unwrap();
        assert_eq!(json, "\"found\"");
    }
}
