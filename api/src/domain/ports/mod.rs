//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod storage;

pub use repositories::{
    AttendanceRepository, ComplaintRepository, LostFoundRepository, MessageRepository,
    NoteRepository, SessionRepository, StudentRepository, TeacherRepository, UserRepository,
};
pub use storage::FileStorage;
