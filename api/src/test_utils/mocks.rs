//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::domain::entities::{
    Attendance, AttendanceId, Complaint, ComplaintId, LostFoundId, LostFoundImage,
    LostFoundPost, Message, MessageId, NewAttendance, NewComplaint, NewLostFoundPost,
    NewMessage, NewNote, NewSession, NewUser, Note, NoteId, Role, Session, SessionId, Student,
    StudentDetails, StudentId, Teacher, TeacherDetails, TeacherId, UploadCategory, User,
    UserId,
};
use crate::domain::ports::{
    AttendanceRepository, ComplaintRepository, FileStorage, LostFoundRepository,
    MessageRepository, NoteRepository, SessionRepository, StudentRepository, TeacherRepository,
    UserRepository,
};
use crate::error::{DomainError, StorageError};

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    /// Phone lookups miss, as when a concurrent request inserts in between
    stale_phone_lookups: bool,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_by_phone` report no match while `create` still enforces uniqueness
    pub fn with_stale_phone_lookups(mut self) -> Self {
        self.stale_phone_lookups = true;
        self
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        if self.stale_phone_lookups {
            return Ok(None);
        }
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_phone_and_role(
        &self,
        phone: &str,
        role: Role,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users
            .values()
            .find(|u| u.phone == phone && u.role == role)
            .cloned())
    }

    async fn exists_with_role(&self, role: Role) -> Result<bool, DomainError> {
        Ok(self.users.read().unwrap().values().any(|u| u.role == role))
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|u| u.phone == new_user.phone) {
            return Err(DomainError::AlreadyExists(format!(
                "User with phone {} already exists",
                new_user.phone
            )));
        }

        let user = User {
            id: UserId::new(),
            name: new_user.name.clone(),
            branch: new_user.branch.clone(),
            year: new_user.year,
            phone: new_user.phone.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

// ============================================================================
// In-Memory Session Repository
// ============================================================================

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, new_session: &NewSession) -> Result<Session, DomainError> {
        let session = Session {
            id: SessionId(Uuid::new_v4()),
            user_id: new_session.user_id,
            token_hash: new_session.token_hash.clone(),
            created_at: Utc::now(),
            expires_at: new_session.expires_at,
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.token_hash.clone(), session.clone());
        Ok(session)
    }

    async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().unwrap().get(token_hash).cloned())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.sessions.write().unwrap().remove(token_hash).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// In-Memory Student Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Arc<RwLock<HashMap<StudentId, Student>>>,
    /// Attendance store to cascade deletes into, when linked
    attendance: Option<Arc<InMemoryAttendanceRepository>>,
    stale_roll_lookups: bool,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a student for testing
    pub fn with_student(self, student: Student) -> Self {
        self.students.write().unwrap().insert(student.id, student);
        self
    }

    /// Make `find_by_roll_number` miss while writes still enforce uniqueness
    pub fn with_stale_roll_lookups(mut self) -> Self {
        self.stale_roll_lookups = true;
        self
    }

    /// Link an attendance store so deleting a student removes its records
    pub fn with_attendance(mut self, attendance: Arc<InMemoryAttendanceRepository>) -> Self {
        self.attendance = Some(attendance);
        self
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError> {
        Ok(self.students.read().unwrap().get(id).cloned())
    }

    async fn find_by_roll_number(
        &self,
        roll_number: &str,
    ) -> Result<Option<Student>, DomainError> {
        if self.stale_roll_lookups {
            return Ok(None);
        }
        let students = self.students.read().unwrap();
        Ok(students
            .values()
            .find(|s| s.roll_number == roll_number)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Student>, DomainError> {
        let mut students: Vec<_> = self.students.read().unwrap().values().cloned().collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }

    async fn create(&self, details: &StudentDetails) -> Result<Student, DomainError> {
        let mut students = self.students.write().unwrap();
        if students.values().any(|s| s.roll_number == details.roll_number) {
            return Err(DomainError::AlreadyExists(format!(
                "Student with roll number {} already exists",
                details.roll_number
            )));
        }

        let student = Student {
            id: StudentId(Uuid::new_v4()),
            name: details.name.clone(),
            branch: details.branch.clone(),
            year: details.year,
            roll_number: details.roll_number.clone(),
        };
        students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(
        &self,
        id: &StudentId,
        details: &StudentDetails,
    ) -> Result<Student, DomainError> {
        let mut students = self.students.write().unwrap();
        if students
            .values()
            .any(|s| s.id != *id && s.roll_number == details.roll_number)
        {
            return Err(DomainError::AlreadyExists(format!(
                "Student with roll number {} already exists",
                details.roll_number
            )));
        }
        let student = students
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Student {} not found", id)))?;

        student.name = details.name.clone();
        student.branch = details.branch.clone();
        student.year = details.year;
        student.roll_number = details.roll_number.clone();
        Ok(student.clone())
    }

    async fn delete(&self, id: &StudentId) -> Result<(), DomainError> {
        if self.students.write().unwrap().remove(id).is_none() {
            return Err(DomainError::NotFound(format!("Student {} not found", id)));
        }
        if let Some(attendance) = &self.attendance {
            attendance.remove_for_student(id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.students.read().unwrap().len() as u64)
    }
}

// ============================================================================
// In-Memory Attendance Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryAttendanceRepository {
    records: Arc<RwLock<HashMap<AttendanceId, Attendance>>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn remove_for_student(&self, student_id: &StudentId) {
        self.records
            .write()
            .unwrap()
            .retain(|_, r| r.student_id != *student_id);
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_for_student_on(
        &self,
        student_id: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, DomainError> {
        let records = self.records.read().unwrap();
        Ok(records
            .values()
            .find(|r| r.student_id == *student_id && r.date == date)
            .cloned())
    }

    async fn upsert(&self, new_record: &NewAttendance) -> Result<Attendance, DomainError> {
        let mut records = self.records.write().unwrap();
        if let Some(stored) = records
            .values_mut()
            .find(|r| r.student_id == new_record.student_id && r.date == new_record.date)
        {
            stored.status = new_record.status;
            stored.marked_by = new_record.marked_by;
            return Ok(stored.clone());
        }

        let record = Attendance {
            id: AttendanceId(Uuid::new_v4()),
            student_id: new_record.student_id,
            date: new_record.date,
            status: new_record.status,
            marked_by: new_record.marked_by,
        };
        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Attendance>, DomainError> {
        let records = self.records.read().unwrap();
        Ok(records.values().filter(|r| r.date == date).cloned().collect())
    }

    async fn list_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Attendance>, DomainError> {
        let mut records: Vec<_> = self
            .records
            .read()
            .unwrap()
            .values()
            .filter(|r| r.student_id == *student_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(records)
    }

    async fn distinct_dates_since(&self, since: NaiveDate) -> Result<Vec<NaiveDate>, DomainError> {
        let records = self.records.read().unwrap();
        let dates: HashSet<NaiveDate> = records
            .values()
            .map(|r| r.date)
            .filter(|d| *d >= since)
            .collect();

        let mut dates: Vec<_> = dates.into_iter().collect();
        dates.sort_by(|a, b| b.cmp(a));
        Ok(dates)
    }

    async fn count_on(&self, date: NaiveDate) -> Result<u64, DomainError> {
        let records = self.records.read().unwrap();
        Ok(records.values().filter(|r| r.date == date).count() as u64)
    }
}

// ============================================================================
// In-Memory Lost & Found Repository
// ============================================================================

/// Posts are kept in insertion order; listings return the newest first.
#[derive(Default)]
pub struct InMemoryLostFoundRepository {
    posts: Arc<RwLock<Vec<LostFoundPost>>>,
}

impl InMemoryLostFoundRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LostFoundRepository for InMemoryLostFoundRepository {
    async fn create(&self, new_post: &NewLostFoundPost) -> Result<LostFoundPost, DomainError> {
        let now = Utc::now();
        let post = LostFoundPost {
            id: new_post.id,
            title: new_post.title.clone(),
            description: new_post.description.clone(),
            item_type: new_post.item_type,
            posted_by: new_post.posted_by,
            posted_at: now,
            contact_info: new_post.contact_info.clone(),
            location: new_post.location.clone(),
            date_occurred: new_post.date_occurred,
            is_resolved: false,
            images: new_post
                .image_filenames
                .iter()
                .map(|filename| LostFoundImage {
                    id: Uuid::new_v4(),
                    post_id: new_post.id,
                    filename: filename.clone(),
                    uploaded_at: now,
                })
                .collect(),
        };
        self.posts.write().unwrap().push(post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: &LostFoundId) -> Result<Option<LostFoundPost>, DomainError> {
        let posts = self.posts.read().unwrap();
        Ok(posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<LostFoundPost>, DomainError> {
        Ok(self.posts.read().unwrap().iter().rev().cloned().collect())
    }

    async fn set_resolved(&self, id: &LostFoundId, resolved: bool) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Post {} not found", id)))?;
        post.is_resolved = resolved;
        Ok(())
    }

    async fn delete(&self, id: &LostFoundId) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != *id);
        if posts.len() == before {
            return Err(DomainError::NotFound(format!("Post {} not found", id)));
        }
        Ok(())
    }

    async fn count_unresolved(&self) -> Result<u64, DomainError> {
        let posts = self.posts.read().unwrap();
        Ok(posts.iter().filter(|p| !p.is_resolved).count() as u64)
    }
}

// ============================================================================
// In-Memory Complaint Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryComplaintRepository {
    complaints: Arc<RwLock<Vec<Complaint>>>,
}

impl InMemoryComplaintRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn create(&self, new_complaint: &NewComplaint) -> Result<Complaint, DomainError> {
        let complaint = Complaint {
            id: ComplaintId(Uuid::new_v4()),
            title: new_complaint.title.clone(),
            message: new_complaint.message.clone(),
            posted_by: new_complaint.posted_by,
            posted_at: Utc::now(),
            is_resolved: false,
        };
        self.complaints.write().unwrap().push(complaint.clone());
        Ok(complaint)
    }

    async fn find_by_id(&self, id: &ComplaintId) -> Result<Option<Complaint>, DomainError> {
        let complaints = self.complaints.read().unwrap();
        Ok(complaints.iter().find(|c| c.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Complaint>, DomainError> {
        Ok(self.complaints.read().unwrap().iter().rev().cloned().collect())
    }

    async fn set_resolved(&self, id: &ComplaintId, resolved: bool) -> Result<(), DomainError> {
        let mut complaints = self.complaints.write().unwrap();
        let complaint = complaints
            .iter_mut()
            .find(|c| c.id == *id)
            .ok_or_else(|| DomainError::NotFound(format!("Complaint {} not found", id)))?;
        complaint.is_resolved = resolved;
        Ok(())
    }

    async fn delete(&self, id: &ComplaintId) -> Result<(), DomainError> {
        let mut complaints = self.complaints.write().unwrap();
        let before = complaints.len();
        complaints.retain(|c| c.id != *id);
        if complaints.len() == before {
            return Err(DomainError::NotFound(format!("Complaint {} not found", id)));
        }
        Ok(())
    }

    async fn count_unresolved(&self) -> Result<u64, DomainError> {
        let complaints = self.complaints.read().unwrap();
        Ok(complaints.iter().filter(|c| !c.is_resolved).count() as u64)
    }
}

// ============================================================================
// In-Memory Message Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<Vec<Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, new_message: &NewMessage) -> Result<Message, DomainError> {
        let message = Message {
            id: new_message.id,
            content: new_message.content.clone(),
            file_path: new_message.file_path.clone(),
            file_type: new_message.file_type.clone(),
            posted_by: new_message.posted_by,
            posted_at: Utc::now(),
        };
        self.messages.write().unwrap().push(message.clone());
        Ok(message)
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<Message>, DomainError> {
        let messages = self.messages.read().unwrap();
        Ok(messages.iter().find(|m| m.id == *id).cloned())
    }

    async fn list(&self) -> Result<Vec<Message>, DomainError> {
        Ok(self.messages.read().unwrap().iter().rev().cloned().collect())
    }

    async fn delete(&self, id: &MessageId) -> Result<(), DomainError> {
        let mut messages = self.messages.write().unwrap();
        let before = messages.len();
        messages.retain(|m| m.id != *id);
        if messages.len() == before {
            return Err(DomainError::NotFound(format!("Message {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Note Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Arc<RwLock<Vec<Note>>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, new_note: &NewNote) -> Result<Note, DomainError> {
        let note = Note {
            id: new_note.id,
            title: new_note.title.clone(),
            content: new_note.content.clone(),
            posted_by: new_note.posted_by,
            posted_at: Utc::now(),
            is_public: new_note.is_public,
            file_path: new_note.file_path.clone(),
            file_type: new_note.file_type.clone(),
        };
        self.notes.write().unwrap().push(note.clone());
        Ok(note)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes.iter().find(|n| n.id == *id).cloned())
    }

    async fn list_visible_to(&self, viewer: &UserId) -> Result<Vec<Note>, DomainError> {
        let notes = self.notes.read().unwrap();
        Ok(notes
            .iter()
            .rev()
            .filter(|n| n.is_visible_to(viewer))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), DomainError> {
        let mut notes = self.notes.write().unwrap();
        let before = notes.len();
        notes.retain(|n| n.id != *id);
        if notes.len() == before {
            return Err(DomainError::NotFound(format!("Note {} not found", id)));
        }
        Ok(())
    }
}

// ============================================================================
// In-Memory Teacher Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryTeacherRepository {
    teachers: Arc<RwLock<HashMap<TeacherId, Teacher>>>,
}

impl InMemoryTeacherRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeacherRepository for InMemoryTeacherRepository {
    async fn find_by_id(&self, id: &TeacherId) -> Result<Option<Teacher>, DomainError> {
        Ok(self.teachers.read().unwrap().get(id).cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Teacher>, DomainError> {
        let teachers = self.teachers.read().unwrap();
        Ok(teachers.values().find(|t| t.phone == phone).cloned())
    }

    async fn list(&self) -> Result<Vec<Teacher>, DomainError> {
        let mut teachers: Vec<_> = self.teachers.read().unwrap().values().cloned().collect();
        teachers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(teachers)
    }

    async fn create(&self, details: &TeacherDetails) -> Result<Teacher, DomainError> {
        let teacher = Teacher {
            id: TeacherId(Uuid::new_v4()),
            name: details.name.clone(),
            phone: details.phone.clone(),
            branch: details.branch.clone(),
            email: details.email.clone(),
            designation: details.designation.clone(),
        };
        self.teachers
            .write()
            .unwrap()
            .insert(teacher.id, teacher.clone());
        Ok(teacher)
    }

    async fn update(
        &self,
        id: &TeacherId,
        details: &TeacherDetails,
    ) -> Result<Teacher, DomainError> {
        let mut teachers = self.teachers.write().unwrap();
        let teacher = teachers
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Teacher {} not found", id)))?;

        teacher.name = details.name.clone();
        teacher.phone = details.phone.clone();
        teacher.branch = details.branch.clone();
        teacher.email = details.email.clone();
        teacher.designation = details.designation.clone();
        Ok(teacher.clone())
    }

    async fn delete(&self, id: &TeacherId) -> Result<(), DomainError> {
        if self.teachers.write().unwrap().remove(id).is_none() {
            return Err(DomainError::NotFound(format!("Teacher {} not found", id)));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.teachers.read().unwrap().len() as u64)
    }
}

// ============================================================================
// In-Memory File Storage
// ============================================================================

#[derive(Default)]
pub struct InMemoryFileStorage {
    files: Arc<RwLock<HashMap<(UploadCategory, String), Vec<u8>>>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, category: UploadCategory, filename: &str) -> bool {
        self.files
            .read()
            .unwrap()
            .contains_key(&(category, filename.to_string()))
    }

    pub fn file_count(&self) -> usize {
        self.files.read().unwrap().len()
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn ensure_layout(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn save(
        &self,
        category: UploadCategory,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(), StorageError> {
        if filename.is_empty() || filename.contains('/') {
            return Err(StorageError::InvalidFilename(filename.to_string()));
        }
        self.files
            .write()
            .unwrap()
            .insert((category, filename.to_string()), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, category: UploadCategory, filename: &str) -> Result<(), StorageError> {
        self.files
            .write()
            .unwrap()
            .remove(&(category, filename.to_string()));
        Ok(())
    }
}
