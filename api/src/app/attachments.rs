//! Single-file attachments for messages and notes

use crate::app::upload_policy::{
    file_extension, is_allowed, secure_filename, stored_name, UploadedFile,
};
use crate::domain::entities::UploadCategory;
use crate::domain::ports::FileStorage;
use crate::error::{AppError, DomainError};

/// Where an accepted attachment ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    pub file_path: String,
    pub file_type: String,
}

/// Validate and write an attachment. A disallowed type rejects the whole post.
pub async fn store_attachment<FS>(
    storage: &FS,
    category: UploadCategory,
    owner: &str,
    file: &UploadedFile,
) -> Result<StoredAttachment, AppError>
where
    FS: FileStorage + ?Sized,
{
    let not_allowed =
        || AppError::from(DomainError::Validation("File type not allowed".to_string()));

    if !is_allowed(&file.filename) {
        return Err(not_allowed());
    }
    let safe = secure_filename(&file.filename).ok_or_else(not_allowed)?;
    let file_type = file_extension(&safe).ok_or_else(not_allowed)?;

    let file_path = stored_name(chrono::Utc::now(), owner, &safe);
    storage.save(category, &file_path, &file.bytes).await?;

    Ok(StoredAttachment {
        file_path,
        file_type,
    })
}

/// Best-effort removal; a failure is logged and otherwise ignored
pub async fn discard<FS>(storage: &FS, category: UploadCategory, filename: &str)
where
    FS: FileStorage + ?Sized,
{
    if let Err(e) = storage.remove(category, filename).await {
        tracing::warn!(%category, filename, error = %e, "Failed to remove stored file");
    }
}
