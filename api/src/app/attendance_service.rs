//! Attendance service
//!
//! Marks daily attendance and manages the student roster it is taken against.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::authors::author_names;
use crate::app::validation::{duplicate_as, parse_optional_date, present, require_admin};
use crate::domain::entities::{
    Attendance, AttendanceStatus, AttendanceSummary, NewAttendance, Student, StudentDetails,
    StudentId, User,
};
use crate::domain::ports::{AttendanceRepository, StudentRepository, UserRepository};
use crate::error::{AppError, DomainError};

/// How far back the overview lists dates that have records
const RECENT_DAYS: i64 = 30;

const ROLL_TAKEN: &str = "Roll number already exists";

/// Attendance form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarkAttendance {
    pub student_id: Option<Uuid>,
    pub status: Option<String>,
    /// `YYYY-MM-DD`, today when absent
    pub date: Option<String>,
}

/// Roster form, shared by add and edit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentForm {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub roll_number: Option<String>,
}

impl StudentForm {
    fn into_details(self) -> Result<StudentDetails, DomainError> {
        match (
            present(&self.name),
            present(&self.branch),
            self.year.filter(|y| *y > 0),
            present(&self.roll_number),
        ) {
            (Some(name), Some(branch), Some(year), Some(roll_number)) => Ok(StudentDetails {
                name,
                branch,
                year,
                roll_number,
            }),
            _ => Err(DomainError::Validation(
                "Please fill all required fields".to_string(),
            )),
        }
    }
}

/// Result of marking attendance
#[derive(Debug, Clone)]
pub struct MarkOutcome {
    pub record: Attendance,
    pub student_name: String,
    /// False when an existing record for the date was overwritten
    pub created: bool,
}

impl MarkOutcome {
    pub fn message(&self) -> String {
        format!(
            "Attendance {} successfully for {} on {}",
            if self.created { "marked" } else { "updated" },
            self.student_name,
            self.record.date
        )
    }
}

/// One attendance row with the names a listing shows
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: Attendance,
    pub student_name: String,
    pub roll_number: String,
    pub marked_by_name: Option<String>,
}

/// Attendance page for a single date
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceOverview {
    pub date: NaiveDate,
    pub students: Vec<Student>,
    pub records: Vec<AttendanceEntry>,
    /// Dates with records in the last 30 days, newest first
    pub recent_dates: Vec<NaiveDate>,
}

/// One student's attendance history
#[derive(Debug, Clone, Serialize)]
pub struct StudentAttendance {
    pub student: Student,
    pub records: Vec<Attendance>,
    pub summary: AttendanceSummary,
}

/// Service for attendance and the student roster
pub struct AttendanceService<SR, AR, UR>
where
    SR: StudentRepository,
    AR: AttendanceRepository,
    UR: UserRepository,
{
    students: Arc<SR>,
    attendance: Arc<AR>,
    users: Arc<UR>,
}

impl<SR, AR, UR> AttendanceService<SR, AR, UR>
where
    SR: StudentRepository,
    AR: AttendanceRepository,
    UR: UserRepository,
{
    pub fn new(students: Arc<SR>, attendance: Arc<AR>, users: Arc<UR>) -> Self {
        Self {
            students,
            attendance,
            users,
        }
    }

    /// Mark or re-mark a student for a date
    pub async fn mark(&self, actor: &User, form: MarkAttendance) -> Result<MarkOutcome, AppError> {
        if !actor.can_mark_attendance() {
            return Err(DomainError::Forbidden(
                "You are not authorized to mark attendance".to_string(),
            )
            .into());
        }

        let (Some(student_id), Some(status)) = (form.student_id, present(&form.status)) else {
            return Err(DomainError::Validation(
                "Please select both student and status".to_string(),
            )
            .into());
        };
        let status: AttendanceStatus = status.parse().map_err(DomainError::Validation)?;
        let date = parse_optional_date(&form.date)?.unwrap_or_else(today);

        let student = self
            .students
            .find_by_id(&StudentId(student_id))
            .await?
            .ok_or_else(|| DomainError::NotFound("Selected student not found".to_string()))?;

        let created = self
            .attendance
            .find_for_student_on(&student.id, date)
            .await?
            .is_none();
        let record = self
            .attendance
            .upsert(&NewAttendance {
                student_id: student.id,
                date,
                status,
                marked_by: actor.id,
            })
            .await?;

        tracing::info!(
            student_id = %student.id,
            %date,
            %status,
            marked_by = %actor.id,
            created,
            "Recorded attendance"
        );

        Ok(MarkOutcome {
            record,
            student_name: student.name,
            created,
        })
    }

    /// Roster plus the records of one date (today by default)
    pub async fn overview(&self, date: Option<String>) -> Result<AttendanceOverview, AppError> {
        let date = parse_optional_date(&date)?.unwrap_or_else(today);

        let students = self.students.list().await?;
        let records = self.attendance.list_by_date(date).await?;
        let recent_dates = self
            .attendance
            .distinct_dates_since(today() - Duration::days(RECENT_DAYS))
            .await?;

        let markers = author_names(self.users.as_ref(), records.iter().map(|r| r.marked_by)).await?;

        let records = records
            .into_iter()
            .filter_map(|record| {
                let student = students.iter().find(|s| s.id == record.student_id)?;
                Some(AttendanceEntry {
                    student_name: student.name.clone(),
                    roll_number: student.roll_number.clone(),
                    marked_by_name: markers.get(&record.marked_by).cloned(),
                    record,
                })
            })
            .collect();

        Ok(AttendanceOverview {
            date,
            students,
            records,
            recent_dates,
        })
    }

    /// Full history of one student with totals
    pub async fn student_attendance(&self, id: &StudentId) -> Result<StudentAttendance, AppError> {
        let student = self.get_student(id).await?;
        let records = self.attendance.list_for_student(id).await?;
        let summary = AttendanceSummary::from_records(&records);

        Ok(StudentAttendance {
            student,
            records,
            summary,
        })
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.students.list().await?)
    }

    pub async fn get_student(&self, id: &StudentId) -> Result<Student, AppError> {
        self.students
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Student {} not found", id)).into())
    }

    pub async fn add_student(&self, actor: &User, form: StudentForm) -> Result<Student, AppError> {
        require_admin(actor, "Only admin can add students")?;
        let details = form.into_details()?;

        if self
            .students
            .find_by_roll_number(&details.roll_number)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists(ROLL_TAKEN.to_string()).into());
        }

        let student = self
            .students
            .create(&details)
            .await
            .map_err(duplicate_as(ROLL_TAKEN))?;
        tracing::info!(
            student_id = %student.id,
            roll_number = %student.roll_number,
            "Added student"
        );
        Ok(student)
    }

    pub async fn edit_student(
        &self,
        actor: &User,
        id: &StudentId,
        form: StudentForm,
    ) -> Result<Student, AppError> {
        require_admin(actor, "Only admin can edit students")?;
        self.get_student(id).await?;
        let details = form.into_details()?;

        if let Some(other) = self
            .students
            .find_by_roll_number(&details.roll_number)
            .await?
        {
            if other.id != *id {
                return Err(DomainError::AlreadyExists(ROLL_TAKEN.to_string()).into());
            }
        }

        let student = self
            .students
            .update(id, &details)
            .await
            .map_err(duplicate_as(ROLL_TAKEN))?;
        tracing::info!(student_id = %student.id, "Updated student");
        Ok(student)
    }

    /// Remove a student and their attendance history
    pub async fn delete_student(&self, actor: &User, id: &StudentId) -> Result<(), AppError> {
        require_admin(actor, "Only admin can delete students")?;
        self.students.delete(id).await?;
        tracing::info!(student_id = %id, "Deleted student");
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
