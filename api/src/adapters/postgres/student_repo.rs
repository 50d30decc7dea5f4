//! PostgreSQL adapter for StudentRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{Student, StudentDetails, StudentId};
use crate::domain::ports::StudentRepository;
use crate::entity::{attendance, students};
use crate::error::DomainError;

pub struct PostgresStudentRepository {
    db: DatabaseConnection,
}

impl PostgresStudentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError> {
        let result = students::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<Student>, DomainError> {
        let result = students::Entity::find()
            .filter(students::Column::RollNumber.eq(roll_number))
            .one(&self.db)
            .await?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Student>, DomainError> {
        let results = students::Entity::find()
            .order_by_asc(students::Column::Name)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, student: &StudentDetails) -> Result<Student, DomainError> {
        let model = students::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(student.name.clone()),
            branch: Set(student.branch.clone()),
            year: Set(student.year),
            roll_number: Set(student.roll_number.clone()),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn update(
        &self,
        id: &StudentId,
        student: &StudentDetails,
    ) -> Result<Student, DomainError> {
        let result = students::ActiveModel {
            id: Set(id.0),
            name: Set(student.name.clone()),
            branch: Set(student.branch.clone()),
            year: Set(student.year),
            roll_number: Set(student.roll_number.clone()),
        }
        .update(&self.db)
        .await?;

        Ok(result.into())
    }

    async fn delete(&self, id: &StudentId) -> Result<(), DomainError> {
        let txn = self.db.begin().await?;

        attendance::Entity::delete_many()
            .filter(attendance::Column::StudentId.eq(id.0))
            .exec(&txn)
            .await?;

        let result = students::Entity::delete_by_id(id.0).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Student {} not found", id)));
        }

        txn.commit().await?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(students::Entity::find().count(&self.db).await?)
    }
}

impl From<students::Model> for Student {
    fn from(model: students::Model) -> Self {
        Student {
            id: StudentId(model.id),
            name: model.name,
            branch: model.branch,
            year: model.year,
            roll_number: model.roll_number,
        }
    }
}
