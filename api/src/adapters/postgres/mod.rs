//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod attendance_repo;
pub mod complaint_repo;
pub mod lost_found_repo;
pub mod message_repo;
pub mod note_repo;
pub mod schema;
pub mod session_repo;
pub mod student_repo;
pub mod teacher_repo;
pub mod user_repo;


pub use attendance_repo::PostgresAttendanceRepository;
pub use complaint_repo::PostgresComplaintRepository;
pub use lost_found_repo::PostgresLostFoundRepository;
pub use message_repo::PostgresMessageRepository;
pub use note_repo::PostgresNoteRepository;
pub use schema::create_schema;
pub use session_repo::PostgresSessionRepository;
pub use student_repo::PostgresStudentRepository;
pub use teacher_repo::PostgresTeacherRepository;
pub use user_repo::PostgresUserRepository;
