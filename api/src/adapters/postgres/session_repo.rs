//! PostgreSQL adapter for SessionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::entities::{NewSession, Session, SessionId, UserId};
use crate::domain::ports::SessionRepository;
use crate::entity::sessions;
use crate::error::DomainError;

pub struct PostgresSessionRepository {
    db: DatabaseConnection,
}

impl PostgresSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError> {
        let model = sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(session.user_id.0),
            token_hash: Set(session.token_hash.clone()),
            created_at: Set(Utc::now().fixed_offset()),
            expires_at: Set(session.expires_at.fixed_offset()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        let result = sessions::Entity::find()
            .filter(sessions::Column::TokenHash.eq(token_hash))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sessions::Entity::delete_many()
            .filter(sessions::Column::ExpiresAt.lte(now.fixed_offset()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

impl From<sessions::Model> for Session {
    fn from(model: sessions::Model) -> Self {
        Session {
            id: SessionId(model.id),
            user_id: UserId(model.user_id),
            token_hash: model.token_hash,
            created_at: model.created_at.with_timezone(&Utc),
            expires_at: model.expires_at.with_timezone(&Utc),
        }
    }
}
