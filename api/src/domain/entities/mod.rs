//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod attendance;
pub mod complaint;
pub mod lost_found;
pub mod message;
pub mod note;
pub mod session;
pub mod student;
pub mod teacher;
pub mod upload;
pub mod user;

pub use attendance::{
    Attendance, AttendanceId, AttendanceStatus, AttendanceSummary, NewAttendance,
};
pub use complaint::{Complaint, ComplaintId, NewComplaint};
pub use lost_found::{
    ItemType, LostFoundId, LostFoundImage, LostFoundPost, NewLostFoundPost, MAX_IMAGES_PER_POST,
};
pub use message::{Message, MessageId, NewMessage};
pub use note::{NewNote, Note, NoteId};
pub use session::{NewSession, Session, SessionId};
pub use student::{Student, StudentDetails, StudentId};
pub use teacher::{Teacher, TeacherDetails, TeacherId};
pub use upload::UploadCategory;
pub use user::{NewUser, Role, User, UserId};
