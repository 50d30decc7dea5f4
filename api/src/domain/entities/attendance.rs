//! Attendance entity
//!
//! One record per student per date. Re-marking a date overwrites the status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::student::StudentId;
use super::user::UserId;

/// Unique identifier for an attendance record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttendanceId(pub Uuid);

impl From<Uuid> for AttendanceId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttendanceStatus::Present => write!(f, "Present"),
            AttendanceStatus::Absent => write!(f, "Absent"),
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            _ => Err(format!("Unknown attendance status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Attendance {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: UserId,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_by: UserId,
}

/// Present/absent tally over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    /// Share of present days, 0.0 when there are no records
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[Attendance]) -> Self {
        let total = records.len();
        let present = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let percentage = if total == 0 {
            0.0
        } else {
            (present as f64 / total as f64 * 10000.0).round() / 100.0
        };

        Self {
            total,
            present,
            absent: total - present,
            percentage,
        }
    }
}
