//! Local disk storage for uploads
//!
//! Layout: `<root>/<category>/<filename>`,
//! e.g. `static/uploads/notes/20240301_101500_ab12cd34_slides.pdf`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::UploadCategory;
use crate::domain::ports::FileStorage;
use crate::error::StorageError;

pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored name, refusing anything that could leave the category directory
    fn path_for(&self, category: UploadCategory, filename: &str) -> Result<PathBuf, StorageError> {
        if filename.is_empty()
            || filename.starts_with('.')
            || filename.contains(['/', '\\'])
            || filename.contains("..")
        {
            return Err(StorageError::InvalidFilename(filename.to_string()));
        }

        Ok(self.root.join(category.dir_name()).join(filename))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn ensure_layout(&self) -> Result<(), StorageError> {
        for category in UploadCategory::ALL {
            let dir = self.root.join(category.dir_name());
            tokio::fs::create_dir_all(&dir).await?;
            tracing::debug!(dir = %dir.display(), "Upload directory ready");
        }
        Ok(())
    }

    async fn save(
        &self,
        category: UploadCategory,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        let path = self.path_for(category, filename)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload");
        Ok(())
    }

    async fn remove(&self, category: UploadCategory, filename: &str) -> Result<(), StorageError> {
        let path = self.path_for(category, filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed upload");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
