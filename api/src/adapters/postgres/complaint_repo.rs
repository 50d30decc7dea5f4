//! PostgreSQL adapter for ComplaintRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Complaint, ComplaintId, NewComplaint, UserId};
use crate::domain::ports::ComplaintRepository;
use crate::entity::complaints;
use crate::error::DomainError;

pub struct PostgresComplaintRepository {
    db: DatabaseConnection,
}

impl PostgresComplaintRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ComplaintRepository for PostgresComplaintRepository {
    async fn create(&self, complaint: &NewComplaint) -> Result<Complaint, DomainError> {
        let model = complaints::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(complaint.title.clone()),
            message: Set(complaint.message.clone()),
            posted_by: Set(complaint.posted_by.0),
            posted_at: Set(Utc::now().fixed_offset()),
            is_resolved: Set(false),
        };

        let result = model.insert(&self.db).await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        let result = complaints::Entity::find_by_id(id.0).one(&self.db).await?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(&self) -> Result<Vec<Complaint>, DomainError> {
        let results = complaints::Entity::find()
            .order_by_desc(complaints::Column::PostedAt)
            .all(&self.db)
            .await?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn set_resolved(&self, id: &ComplaintId, resolved: bool) -> Result<(), DomainError> {
        complaints::ActiveModel {
            id: Set(id.0),
            is_resolved: Set(resolved),
            ..Default::default()
        }
        .update(&self.db)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &ComplaintId) -> Result<(), DomainError> {
        let result = complaints::Entity::delete_by_id(id.0).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!("Complaint {} not found", id)));
        }

        Ok(())
    }

    async fn count_unresolved(&self) -> Result<u64, DomainError> {
        let count = complaints::Entity::find()
            .filter(complaints::Column::IsResolved.eq(false))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

impl From<complaints::Model> for Complaint {
    fn from(model: complaints::Model) -> Self {
        Complaint {
            id: ComplaintId(model.id),
            title: model.title,
            message: model.message,
            posted_by: UserId(model.posted_by),
            posted_at: model.posted_at.with_timezone(&Utc),
            is_resolved: model.is_resolved,
        }
    }
}
