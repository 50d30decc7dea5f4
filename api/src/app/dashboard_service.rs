//! Dashboard counters

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::domain::ports::{
    AttendanceRepository, ComplaintRepository, LostFoundRepository, StudentRepository,
    TeacherRepository,
};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_teachers: u64,
    /// Attendance rows dated today
    pub today_attendance: u64,
    pub pending_complaints: u64,
    pub open_lost_found: u64,
}

pub struct DashboardService<SR, TR, AR, CR, LR>
where
    SR: StudentRepository,
    TR: TeacherRepository,
    AR: AttendanceRepository,
    CR: ComplaintRepository,
    LR: LostFoundRepository,
{
    students: Arc<SR>,
    teachers: Arc<TR>,
    attendance: Arc<AR>,
    complaints: Arc<CR>,
    lost_found: Arc<LR>,
}

impl<SR, TR, AR, CR, LR> DashboardService<SR, TR, AR, CR, LR>
where
    SR: StudentRepository,
    TR: TeacherRepository,
    AR: AttendanceRepository,
    CR: ComplaintRepository,
    LR: LostFoundRepository,
{
    pub fn new(
        students: Arc<SR>,
        teachers: Arc<TR>,
        attendance: Arc<AR>,
        complaints: Arc<CR>,
        lost_found: Arc<LR>,
    ) -> Self {
        Self {
            students,
            teachers,
            attendance,
            complaints,
            lost_found,
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let (
            total_students,
            total_teachers,
            today_attendance,
            pending_complaints,
            open_lost_found,
        ) = tokio::try_join!(
            self.students.count(),
            self.teachers.count(),
            self.attendance.count_on(Utc::now().date_naive()),
            self.complaints.count_unresolved(),
            self.lost_found.count_unresolved(),
        )?;

        Ok(DashboardStats {
            total_students,
            total_teachers,
            today_attendance,
            pending_complaints,
            open_lost_found,
        })
    }
}
