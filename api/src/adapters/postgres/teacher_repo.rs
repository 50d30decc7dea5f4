//! PostgreSQL adapter for TeacherRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Teacher, TeacherDetails, TeacherId};
use crate::domain::ports::TeacherRepository;
use crate::entity::teachers;
use crate::error::DomainError;

pub struct PostgresTeacherRepository {
    db: DatabaseConnection,
}

impl PostgresTeacherRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeacherRepository for PostgresTeacherRepository {
    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, DomainError> {
        let result = teachers::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Teacher>, DomainError> {
        let result = teachers::Entity::find()
            .filter(teachers::Column::Phone.eq(phone))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Teacher>, DomainError> {
        let results = teachers::Entity::find()
            .order_by_asc(teachers::Column::Name)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, teacher: &TeacherDetails) -> Result<Teacher, DomainError> {
        let model = teachers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(teacher.name.clone()),
            phone: Set(teacher.phone.clone()),
            branch: Set(teacher.branch.clone()),
            email: Set(teacher.email.clone()),
            designation: Set(teacher.designation.clone()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &TeacherId,
        teacher: &TeacherDetails,
    ) -> Result<Teacher, DomainError> {
        let result = teachers::ActiveModel {
            id: Set(id.0),
            name: Set(teacher.name.clone()),
            phone: Set(teacher.phone.clone()),
            branch: Set(teacher.branch.clone()),
            email: Set(teacher.email.clone()),
            designation: Set(teacher.designation.clone()),
        }
        .update(&self.db)
        .await?;

        Ok(result.into())
    }

    async fn delete(&self, id: &TeacherId) -> Result<(), DomainError> {
        let result = teachers::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Teacher {} not found", id)));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(teachers::Entity::find().count(&self.db).await?)
    }
}

impl From<teachers::Model> for Teacher {
    fn from(model: teachers::Model) -> Self {
        Teacher {
            id: TeacherId(model.id),
            name: model.name,
            phone: model.phone,
            branch: model.branch,
            email: model.email,
            designation: model.designation,
        }
    }
}
