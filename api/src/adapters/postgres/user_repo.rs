//! PostgreSQL adapter for UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::domain::entities::{NewUser, Role, User, UserId};
use crate::domain::ports::UserRepository;
use crate::entity::users;
use crate::error::DomainError;

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = users::Entity::find()
            .filter(users::Column::Id.is_in(ids.iter().map(|id| id.0)))
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_phone_and_role(
        &self,
        phone: &str,
        role: Role,
    ) -> Result<Option<User>, DomainError> {
        let result = users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .filter(users::Column::Role.eq(role.to_string()))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn exists_with_role(&self, role: Role) -> Result<bool, DomainError> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(role.to_string()))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(user.name.clone()),
            branch: Set(user.branch.clone()),
            year: Set(user.year),
            phone: Set(user.phone.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.to_string()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }
}

/// Convert SeaORM model to domain entity
impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        User {
            id: UserId(model.id),
            name: model.name,
            branch: model.branch,
            year: model.year,
            phone: model.phone,
            password_hash: model.password_hash,
            // Unknown roles get the least privileged one
            role: model.role.parse().unwrap_or(Role::Student),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
