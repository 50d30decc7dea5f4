//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod storage;

pub use postgres::{
    create_schema, PostgresAttendanceRepository, PostgresComplaintRepository,
    PostgresLostFoundRepository, PostgresMessageRepository, PostgresNoteRepository,
    PostgresSessionRepository, PostgresStudentRepository, PostgresTeacherRepository,
    PostgresUserRepository,
};
pub use storage::LocalFileStorage;
