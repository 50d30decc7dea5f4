//! Attendance and student roster handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::app::{AttendanceOverview, MarkAttendance, StudentAttendance, StudentForm};
use crate::domain::entities::{Attendance, Student, StudentId, User};
use crate::error::AppError;
use crate::handlers::{JsonBody, MessageResponse, RecordResponse};
use crate::AppState;

/// Query parameters for the attendance page
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    /// `YYYY-MM-DD`, today when absent
    pub date: Option<String>,
}

/// GET /attendance
pub async fn get_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<AttendanceOverview>, AppError> {
    let overview = state.attendance_service.overview(query.date).await?;
    Ok(Json(overview))
}

/// POST /attendance
pub async fn mark_attendance(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<MarkAttendance>,
) -> Result<Json<RecordResponse<Attendance>>, AppError> {
    let outcome = state.attendance_service.mark(&user, request).await?;
    Ok(RecordResponse::new(outcome.message(), outcome.record))
}

/// GET /students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.attendance_service.list_students().await?))
}

/// GET /students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    Ok(Json(state.attendance_service.get_student(&StudentId(id)).await?))
}

/// GET /students/:id/attendance
pub async fn student_attendance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentAttendance>, AppError> {
    let history = state
        .attendance_service
        .student_attendance(&StudentId(id))
        .await?;
    Ok(Json(history))
}

/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<StudentForm>,
) -> Result<(StatusCode, Json<RecordResponse<Student>>), AppError> {
    let student = state.attendance_service.add_student(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        RecordResponse::new("Student added successfully", student),
    ))
}

/// PUT /students/:id
pub async fn update_student(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<StudentForm>,
) -> Result<Json<RecordResponse<Student>>, AppError> {
    let student = state
        .attendance_service
        .edit_student(&user, &StudentId(id), request)
        .await?;
    Ok(RecordResponse::new(
        "Student information updated successfully",
        student,
    ))
}

/// DELETE /students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .attendance_service
        .delete_student(&user, &StudentId(id))
        .await?;
    Ok(MessageResponse::new("Student deleted successfully"))
}
