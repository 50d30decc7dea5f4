//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod attendance;
pub mod auth;
pub mod chatbot;
pub mod complaints;
pub mod dashboard;
pub mod extract;
pub mod form;
pub mod lost_found;
pub mod messages;
pub mod notes;
pub mod teachers;

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub use attendance::{
    create_student, delete_student, get_attendance, get_student, list_students, mark_attendance,
    student_attendance, update_student,
};
pub use auth::{login, logout, me, register};
pub use chatbot::chat;
pub use complaints::{create_complaint, delete_complaint, list_complaints, toggle_complaint};
pub use dashboard::dashboard;
pub use extract::JsonBody;
pub use lost_found::{create_post, delete_post, list_posts, toggle_post};
pub use messages::{create_message, delete_message, list_messages};
pub use notes::{create_note, delete_note, list_notes};
pub use teachers::{create_teacher, delete_teacher, get_teacher, list_teachers, update_teacher};

/// Status message returned by mutations
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Status message plus the record a mutation produced
#[derive(Debug, Serialize)]
pub struct RecordResponse<T: Serialize> {
    pub message: String,
    pub record: T,
}

impl<T: Serialize> RecordResponse<T> {
    pub fn new(message: impl Into<String>, record: T) -> Json<Self> {
        Json(Self {
            message: message.into(),
            record,
        })
    }
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_response_shape() {
        let Json(body) = RecordResponse::new("Student added successfully", vec![1, 2]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Student added successfully");
        assert_eq!(json["record"], serde_json::json!([1, 2]));
    }

    #[tokio::test]
    async fn fallback_is_json_404() {
        let (status, Json(body)) = not_found().await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn unknown_route_hits_fallback() {
        use axum::{body::Body, http::Request, Router};
        use tower::ServiceExt;

        let app: Router = Router::new().fallback(not_found);
        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not found");
    }
}
