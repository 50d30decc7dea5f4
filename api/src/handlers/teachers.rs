//! Teacher directory handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::TeacherForm;
use crate::domain::entities::{Teacher, TeacherId, User};
use crate::error::AppError;
use crate::handlers::{JsonBody, MessageResponse, RecordResponse};
use crate::AppState;

/// GET /teachers
pub async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>, AppError> {
    Ok(Json(state.teacher_service.list().await?))
}

/// GET /teachers/:id
pub async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Teacher>, AppError> {
    Ok(Json(state.teacher_service.get(&TeacherId(id)).await?))
}

/// POST /teachers
pub async fn create_teacher(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<TeacherForm>,
) -> Result<(StatusCode, Json<RecordResponse<Teacher>>), AppError> {
    let teacher = state.teacher_service.add(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        RecordResponse::new("Teacher added successfully", teacher),
    ))
}

/// PUT /teachers/:id
pub async fn update_teacher(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    JsonBody(request): JsonBody<TeacherForm>,
) -> Result<Json<RecordResponse<Teacher>>, AppError> {
    let teacher = state
        .teacher_service
        .edit(&user, &TeacherId(id), request)
        .await?;
    Ok(RecordResponse::new(
        "Teacher information updated successfully",
        teacher,
    ))
}

/// DELETE /teachers/:id
pub async fn delete_teacher(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.teacher_service.delete(&user, &TeacherId(id)).await?;
    Ok(MessageResponse::new("Teacher deleted successfully"))
}
