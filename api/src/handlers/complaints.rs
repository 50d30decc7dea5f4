//! Complaint box handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::{ComplaintForm, ComplaintView};
use crate::domain::entities::{ComplaintId, User};
use crate::error::AppError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::AppState;

/// GET /complaints
pub async fn list_complaints(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<ComplaintView>>, AppError> {
    Ok(Json(state.complaint_service.list(&user).await?))
}

/// POST /complaints
pub async fn create_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<ComplaintForm>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    state.complaint_service.submit(&user, request).await?;
    Ok((
        StatusCode::CREATED,
        MessageResponse::new("Complaint submitted successfully"),
    ))
}

/// POST /complaints/:id/resolve
pub async fn toggle_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let resolved = state
        .complaint_service
        .toggle_resolved(&user, &ComplaintId(id))
        .await?;

    let status = if resolved { "resolved" } else { "reopened" };
    Ok(MessageResponse::new(format!("Complaint marked as {}", status)))
}

/// DELETE /complaints/:id
pub async fn delete_complaint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .complaint_service
        .delete(&user, &ComplaintId(id))
        .await?;
    Ok(MessageResponse::new("Complaint deleted successfully"))
}
