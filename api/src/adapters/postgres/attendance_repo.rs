//! PostgreSQL adapter for AttendanceRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{Attendance, AttendanceId, NewAttendance, StudentId, UserId};
use crate::domain::ports::AttendanceRepository;
use crate::entity::attendance;
use crate::error::DomainError;

pub struct PostgresAttendanceRepository {
    db: DatabaseConnection,
}

impl PostgresAttendanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn find_for_student_on(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, DomainError> {
        let result = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id.0))
            .filter(attendance::Column::Date.eq(date))
            .one(&self.db)
            .await?;

        result.map(Attendance::try_from).transpose()
    }

    async fn upsert(&self, record: &NewAttendance) -> Result<Attendance, DomainError> {
        let model = attendance::ActiveModel {
            id: Set(Uuid::new_v4()),
            student_id: Set(record.student_id.0),
            date: Set(record.date),
            status: Set(record.status.to_string()),
            marked_by: Set(record.marked_by.0),
        };

        // Keyed on idx_attendance_student_date; the existing row keeps its id
        let result = attendance::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([attendance::Column::StudentId, attendance::Column::Date])
                    .update_columns([attendance::Column::Status, attendance::Column::MarkedBy])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await?;

        result.try_into()
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, DomainError> {
        let results = attendance::Entity::find()
            .filter(attendance::Column::Date.eq(date))
            .all(&self.db)
            .await?;

        results.into_iter().map(Attendance::try_from).collect()
    }

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Attendance>, DomainError> {
        let results = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id.0))
            .order_by_desc(attendance::Column::Date)
            .all(&self.db)
            .await?;

        results.into_iter().map(Attendance::try_from).collect()
    }

    async fn distinct_dates_since(&self, since: NaiveDate) -> Result<Vec<NaiveDate>, DomainError> {
        let dates = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::Date)
            .distinct()
            .filter(attendance::Column::Date.gte(since))
            .order_by_desc(attendance::Column::Date)
            .into_tuple::<NaiveDate>()
            .all(&self.db)
            .await?;

        Ok(dates)
    }

    async fn count_on(&self, date: NaiveDate) -> Result<u64, DomainError> {
        let count = attendance::Entity::find()
            .filter(attendance::Column::Date.eq(date))
            .count(&self.db)
            .await?;

        Ok(count)
    }
}

impl TryFrom<attendance::Model> for Attendance {
    type Error = DomainError;

    fn try_from(model: attendance::Model) -> Result<Self, Self::Error> {
        let status = model.status.parse().map_err(|_| {
            tracing::warn!(id = %model.id, status = %model.status, "Unreadable attendance status");
            DomainError::Internal(format!(
                "attendance {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Attendance {
            id: AttendanceId(model.id),
            student_id: StudentId(model.student_id),
            date: model.date,
            status,
            marked_by: UserId(model.marked_by),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AttendanceStatus;

    fn model(status: &str) -> attendance::Model {
        attendance::Model {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: status.to_string(),
            marked_by: Uuid::new_v4(),
        }
    }

    #[test]
    fn stored_status_is_parsed() {
        let record = Attendance::try_from(model("Present")).unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
    }

    #[test]
    fn unknown_stored_status_is_an_internal_error() {
        let result = Attendance::try_from(model("Late"));
        assert!(matches!(result, Err(DomainError::Internal(_))));
    }
}
