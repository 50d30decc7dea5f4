//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and file storage.

pub mod attachments;
pub mod attendance_service;
pub mod auth_service;
pub mod authors;
pub mod chatbot;
pub mod complaint_service;
pub mod dashboard_service;
pub mod lost_found_service;
pub mod message_service;
pub mod note_service;
pub mod teacher_service;
pub mod upload_policy;
pub mod validation;

pub use attendance_service::{
    AttendanceOverview, AttendanceService, MarkAttendance, MarkOutcome, StudentAttendance,
    StudentForm,
};
pub use auth_service::{hash_token, AuthService, LoginCredentials, LoginOutcome, RegisterUser};
pub use complaint_service::{ComplaintForm, ComplaintService, ComplaintView};
pub use dashboard_service::{DashboardService, DashboardStats};
pub use lost_found_service::{LostFoundForm, LostFoundService, LostFoundView, PostOutcome};
pub use message_service::{MessageService, MessageView};
pub use note_service::{checkbox, NoteForm, NoteService, NoteView};
pub use teacher_service::{TeacherForm, TeacherService};
pub use upload_policy::UploadedFile;
