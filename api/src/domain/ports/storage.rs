//! File storage port
//!
//! Uploaded attachments are written under one directory per category.

use async_trait::async_trait;

use crate::domain::entities::UploadCategory;
use crate::error::StorageError;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Create the per-category directories if missing
    async fn ensure_layout(&self) -> Result<(), StorageError>;

    /// Write `bytes` as `filename` in the category directory, replacing any existing file
    async fn save(
        &self,
        category: UploadCategory,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError>;

    /// Remove a stored file. Missing files are not an error.
    async fn remove(&self, category: UploadCategory, filename: &str) -> Result<(), StorageError>;
}
