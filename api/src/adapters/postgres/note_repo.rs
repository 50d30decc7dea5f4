//! PostgreSQL adapter for NoteRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{NewNote, Note, NoteId, UserId};
use crate::domain::ports::NoteRepository;
use crate::entity::notes;
use crate::error::DomainError;

pub struct PostgresNoteRepository {
    db: DatabaseConnection,
}

impl PostgresNoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: &NewNote) -> Result<Note, DomainError> {
        let model = notes::ActiveModel {
            id: Set(note.id.0),
            title: Set(note.title.clone()),
            content: Set(note.content.clone()),
            posted_by: Set(note.posted_by.0),
            posted_at: Set(Utc::now().fixed_offset()),
            is_public: Set(note.is_public),
            file_path: Set(note.file_path.clone()),
            file_type: Set(note.file_type.clone()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, DomainError> {
        let result = notes::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_visible_to(&self, viewer: &UserId) -> Result<Vec<Note>, DomainError> {
        let results = notes::Entity::find()
            .filter(
                Condition::any()
                    .add(notes::Column::IsPublic.eq(true))
                    .add(notes::Column::PostedBy.eq(viewer.0)),
            )
            .order_by_desc(notes::Column::PostedAt)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), DomainError> {
        let result = notes::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Note {} not found", id)));
        }

        Ok(())
    }
}

impl From<notes::Model> for Note {
    fn from(model: notes::Model) -> Self {
        Note {
            id: NoteId(model.id),
            title: model.title,
            content: model.content,
            posted_by: UserId(model.posted_by),
            posted_at: model.posted_at.with_timezone(&Utc),
            is_public: model.is_public,
            file_path: model.file_path,
            file_type: model.file_type,
        }
    }
}
