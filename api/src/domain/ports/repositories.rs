//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{
    Attendance, Complaint, ComplaintId, LostFoundId, LostFoundPost, Message, MessageId,
    NewAttendance, NewComplaint, NewLostFoundPost, NewMessage, NewNote, NewSession, NewUser,
    Note, NoteId, Role, Session, Student, StudentDetails, StudentId, Teacher, TeacherDetails,
    TeacherId, User, UserId,
};
use crate::error::DomainError;

/// Repository for User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find several users at once (missing ids are skipped)
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;

    /// Find a user by phone number
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by phone number and role (login lookup)
    async fn find_by_phone_and_role(
        &self,
        phone: &str,
        role: Role,
    ) -> Result<Option<User>, DomainError>;

    /// Check whether any user holds the given role
    async fn exists_with_role(&self, role: Role) -> Result<bool, DomainError>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
}

/// Repository for login sessions
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn create(&self, session: &NewSession) -> Result<Session, DomainError>;

    /// Find a session by token hash, expired or not
    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError>;

    /// Delete a session by token hash. Returns whether a row was removed.
    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Purge sessions that expired before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

/// Repository for the student roster
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError>;

    async fn find_by_roll_number(&self, roll_number: &str)
        -> Result<Option<Student>, DomainError>;

    /// All students ordered by name
    async fn list(&self) -> Result<Vec<Student>, DomainError>;

    async fn create(&self, student: &StudentDetails) -> Result<Student, DomainError>;

    async fn update(
        &self,
        id: &StudentId,
        student: &StudentDetails,
    ) -> Result<Student, DomainError>;

    /// Delete a student together with its attendance records
    async fn delete(&self, id: &StudentId) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository for attendance records
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Find the record for a student on a date
    async fn find_for_student_on(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, DomainError>;

    /// Insert the record, or overwrite status and marker of the one already
    /// held for the same student and date. Returns the stored row.
    async fn upsert(&self, record: &NewAttendance) -> Result<Attendance, DomainError>;

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, DomainError>;

    /// Records for one student, newest first
    async fn list_for_student(&self, student_id: &StudentId)
        -> Result<Vec<Attendance>, DomainError>;

    /// Distinct dates on or after `since` that have records, newest first
    async fn distinct_dates_since(&self, since: NaiveDate) -> Result<Vec<NaiveDate>, DomainError>;

    async fn count_on(&self, date: NaiveDate) -> Result<u64, DomainError>;
}

/// Repository for lost & found posts and their images
#[async_trait]
pub trait LostFoundRepository: Send + Sync {
    /// Insert a post and its image rows in one transaction
    async fn create(&self, post: &NewLostFoundPost) -> Result<LostFoundPost, DomainError>;

    async fn find_by_id(&self, id: &LostFoundId) -> Result<Option<LostFoundPost>, DomainError>;

    /// All posts, newest first
    async fn list(&self) -> Result<Vec<LostFoundPost>, DomainError>;

    async fn set_resolved(&self, id: &LostFoundId, resolved: bool) -> Result<(), DomainError>;

    /// Delete a post and its image rows
    async fn delete(&self, id: &LostFoundId) -> Result<(), DomainError>;

    async fn count_unresolved(&self) -> Result<u64, DomainError>;
}

/// Repository for complaints
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn create(&self, complaint: &NewComplaint) -> Result<Complaint, DomainError>;

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError>;

    /// All complaints, newest first
    async fn list(&self) -> Result<Vec<Complaint>, DomainError>;

    async fn set_resolved(&self, id: &ComplaintId, resolved: bool) -> Result<(), DomainError>;

    async fn delete(&self, id: &ComplaintId) -> Result<(), DomainError>;

    async fn count_unresolved(&self) -> Result<u64, DomainError>;
}

/// Repository for message board posts
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &NewMessage) -> Result<Message, DomainError>;

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError>;

    /// All messages, newest first
    async fn list(&self) -> Result<Vec<Message>, DomainError>;

    async fn delete(&self, id: &MessageId) -> Result<(), DomainError>;
}

/// Repository for notes
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn create(&self, note: &NewNote) -> Result<Note, DomainError>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, DomainError>;

    /// Public notes plus the viewer's private ones, newest first
    async fn list_visible_to(&self, viewer: &UserId) -> Result<Vec<Note>, DomainError>;

    async fn delete(&self, id: &NoteId) -> Result<(), DomainError>;
}

/// Repository for the teacher directory
#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, DomainError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Teacher>, DomainError>;

    /// All teachers ordered by name
    async fn list(&self) -> Result<Vec<Teacher>, DomainError>;

    async fn create(&self, teacher: &TeacherDetails) -> Result<Teacher, DomainError>;

    async fn update(
        &self,
        id: &TeacherId,
        teacher: &TeacherDetails,
    ) -> Result<Teacher, DomainError>;

    async fn delete(&self, id: &TeacherId) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
