//! Message board handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::MessageView;
use crate::domain::entities::{Message, MessageId, User};
use crate::error::AppError;
use crate::handlers::form::MultipartForm;
use crate::handlers::{MessageResponse, RecordResponse};
use crate::AppState;

/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<MessageView>>, AppError> {
    Ok(Json(state.message_service.list().await?))
}

/// POST /messages
///
/// Multipart form with optional `content` and optional `file`.
pub async fn create_message(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RecordResponse<Message>>), AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let content = form.text("content");
    let file = form.take_file("file");

    let message = state.message_service.post(&user, content, file).await?;

    Ok((
        StatusCode::CREATED,
        RecordResponse::new("Message posted successfully", message),
    ))
}

/// DELETE /messages/:id
pub async fn delete_message(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.message_service.delete(&user, &MessageId(id)).await?;
    Ok(MessageResponse::new("Message deleted successfully"))
}
