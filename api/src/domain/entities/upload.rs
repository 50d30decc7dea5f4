//! Upload categories
//!
//! Each category owns one subdirectory of the upload root.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadCategory {
    LostFound,
    Notes,
    Messages,
}

impl UploadCategory {
    pub const ALL: [UploadCategory; 3] = [
        UploadCategory::LostFound,
        UploadCategory::Notes,
        UploadCategory::Messages,
    ];

    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadCategory::LostFound => "lost_found",
            UploadCategory::Notes => "notes",
            UploadCategory::Messages => "messages",
        }
    }
}

impl std::fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}
