//! Notes handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::app::{checkbox, NoteForm, NoteView};
use crate::domain::entities::{Note, NoteId, User};
use crate::error::AppError;
use crate::handlers::form::MultipartForm;
use crate::handlers::{MessageResponse, RecordResponse};
use crate::AppState;

/// GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<NoteView>>, AppError> {
    Ok(Json(state.note_service.list(&user).await?))
}

/// POST /notes
///
/// Multipart form with `title`, `content`, an `is_public` checkbox and an optional `file`.
pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<RecordResponse<Note>>), AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let fields = NoteForm {
        title: form.text("title"),
        content: form.text("content"),
        is_public: checkbox(form.text("is_public").as_deref()),
    };
    let file = form.take_file("file");

    let note = state.note_service.post(&user, fields, file).await?;

    Ok((
        StatusCode::CREATED,
        RecordResponse::new("Note posted successfully", note),
    ))
}

/// DELETE /notes/:id
pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.note_service.delete(&user, &NoteId(id)).await?;
    Ok(MessageResponse::new("Note deleted successfully"))
}
