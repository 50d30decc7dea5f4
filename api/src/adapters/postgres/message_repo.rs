//! PostgreSQL adapter for MessageRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::entities::{Message, MessageId, NewMessage, UserId};
use crate::domain::ports::MessageRepository;
use crate::entity::messages;
use crate::error::DomainError;

pub struct PostgresMessageRepository {
    db: DatabaseConnection,
}

impl PostgresMessageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: &NewMessage) -> Result<Message, DomainError> {
        let model = messages::ActiveModel {
            id: Set(message.id.0),
            content: Set(message.content.clone()),
            file_path: Set(message.file_path.clone()),
            file_type: Set(message.file_type.clone()),
            posted_by: Set(message.posted_by.0),
            posted_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let result = messages::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Message>, DomainError> {
        let results = messages::Entity::find()
            .order_by_desc(messages::Column::PostedAt)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), DomainError> {
        let result = messages::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Message {} not found", id)));
        }

        Ok(())
    }
}

impl From<messages::Model> for Message {
    fn from(model: messages::Model) -> Self {
        Message {
            id: MessageId(model.id),
            content: model.content,
            file_path: model.file_path,
            file_type: model.file_type,
            posted_by: UserId(model.posted_by),
            posted_at: model.posted_at.with_timezone(&Utc),
        }
    }
}
