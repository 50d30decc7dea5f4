//! Lost & found handlers

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app::{LostFoundForm, LostFoundView};
use crate::domain::entities::{LostFoundId, LostFoundPost, User};
use crate::error::AppError;
use crate::handlers::form::MultipartForm;
use crate::handlers::MessageResponse;
use crate::AppState;

/// Multipart field carrying the images, repeated per file
const IMAGE_FIELD: &str = "item_images";

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    pub message: String,
    /// Images that were skipped
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub post: LostFoundPost,
}

fn lost_found_form(form: &MultipartForm) -> LostFoundForm {
    LostFoundForm {
        title: form.text("title"),
        description: form.text("description"),
        item_type: form.text("item_type").or_else(|| form.text("type")),
        contact_info: form.text("contact_info"),
        location: form.text("location"),
        date_occurred: form.text("date_occurred"),
    }
}

/// GET /lost-found
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<LostFoundView>>, AppError> {
    Ok(Json(state.lost_found_service.list().await?))
}

/// POST /lost-found
///
/// Multipart form with text fields and up to three `item_images`.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatePostResponse>), AppError> {
    let mut form = MultipartForm::read(multipart).await?;
    let fields = lost_found_form(&form);
    let images = form.take_files(IMAGE_FIELD);

    let outcome = state.lost_found_service.post(&user, fields, images).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: outcome.message(),
            warnings: outcome.warnings,
            post: outcome.post,
        }),
    ))
}

/// POST /lost-found/:id/resolve
pub async fn toggle_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let resolved = state
        .lost_found_service
        .toggle_resolved(&user, &LostFoundId(id))
        .await?;

    let status = if resolved { "resolved" } else { "unresolved" };
    Ok(MessageResponse::new(format!("Post marked as {}", status)))
}

/// DELETE /lost-found/:id
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .lost_found_service
        .delete(&user, &LostFoundId(id))
        .await?;
    Ok(MessageResponse::new("Post deleted successfully"))
}
