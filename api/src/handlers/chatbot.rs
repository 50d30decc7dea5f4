//! Chatbot handler

use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::app::chatbot::respond;
use crate::domain::entities::User;
use crate::handlers::JsonBody;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chatbot
pub async fn chat(
    Extension(user): Extension<User>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Json<ChatResponse> {
    Json(ChatResponse {
        response: respond(&user, &request.message),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::test_utils::test_user;

    #[test]
    fn missing_message_defaults_to_empty() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.message, "");
    }

    #[tokio::test]
    async fn chat_wraps_response() {
        let user = test_user(Role::Student);
        let Json(body) = chat(
            Extension(user),
            JsonBody(ChatRequest {
                message: String::new(),
            }),
        )
        .await;
        assert_eq!(body.response, "Please enter a message.");
    }
}
