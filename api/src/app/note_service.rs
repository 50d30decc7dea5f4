//! Notes service
//!
//! Study material, either public or visible to its author only.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app::attachments::{discard, store_attachment};
use crate::app::authors::author_names;
use crate::app::upload_policy::UploadedFile;
use crate::app::validation::present;
use crate::domain::entities::{NewNote, Note, NoteId, UploadCategory, User};
use crate::domain::ports::{FileStorage, NoteRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// Text fields of a new note
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_public: bool,
}

/// Checkbox semantics: "on" or "true" means checked
pub fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("on" | "true")
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct NoteView {
    #[serde(flatten)]
    pub note: Note,
    pub posted_by_name: Option<String>,
}

pub struct NoteService<NR, UR, FS>
where
    NR: NoteRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    notes: Arc<NR>,
    users: Arc<UR>,
    storage: Arc<FS>,
}

impl<NR, UR, FS> NoteService<NR, UR, FS>
where
    NR: NoteRepository,
    UR: UserRepository,
    FS: FileStorage,
{
    pub fn new(notes: Arc<NR>, users: Arc<UR>, storage: Arc<FS>) -> Self {
        Self {
            notes,
            users,
            storage,
        }
    }

    /// Public notes plus the viewer's own, newest first
    pub async fn list(&self, viewer: &User) -> Result<Vec<NoteView>, AppError> {
        let notes = self.notes.list_visible_to(&viewer.id).await?;
        let names = author_names(self.users.as_ref(), notes.iter().map(|n| n.posted_by)).await?;

        Ok(notes
            .into_iter()
            .map(|note| NoteView {
                posted_by_name: names.get(&note.posted_by).cloned(),
                note,
            })
            .collect())
    }

    pub async fn post(
        &self,
        actor: &User,
        form: NoteForm,
        file: Option<UploadedFile>,
    ) -> Result<Note, AppError> {
        let (Some(title), Some(content)) = (present(&form.title), present(&form.content)) else {
            return Err(
                DomainError::Validation("Title and content are required".to_string()).into(),
            );
        };

        let id = NoteId::new();
        let attachment = match file.filter(|f| !f.filename.is_empty()) {
            Some(file) => Some(
                store_attachment(
                    self.storage.as_ref(),
                    UploadCategory::Notes,
                    &id.to_string(),
                    &file,
                )
                .await?,
            ),
            None => None,
        };

        let new_note = NewNote {
            id,
            title,
            content,
            posted_by: actor.id,
            is_public: form.is_public,
            file_path: attachment.as_ref().map(|a| a.file_path.clone()),
            file_type: attachment.map(|a| a.file_type),
        };

        let note = match self.notes.create(&new_note).await {
            Ok(note) => note,
            Err(e) => {
                if let Some(path) = &new_note.file_path {
                    discard(self.storage.as_ref(), UploadCategory::Notes, path).await;
                }
                return Err(e.into());
            }
        };

        tracing::info!(note_id = %note.id, is_public = note.is_public, "Note posted");
        Ok(note)
    }

    pub async fn delete(&self, actor: &User, id: &NoteId) -> Result<(), AppError> {
        let note = self
            .notes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Note {} not found", id)))?;

        if !actor.can_modify(&note.posted_by) {
            return Err(DomainError::Forbidden(
                "You are not authorized to delete this note".to_string(),
            )
            .into());
        }

        if let Some(path) = &note.file_path {
            discard(self.storage.as_ref(), UploadCategory::Notes, path).await;
        }
        self.notes.delete(id).await?;

        tracing::info!(note_id = %id, "Deleted note");
        Ok(())
    }
}
