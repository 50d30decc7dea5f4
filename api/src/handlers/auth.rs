//! Account handlers
//!
//! Registration, login and logout.

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::{LoginCredentials, RegisterUser};
use crate::auth::SessionToken;
use crate::domain::entities::User;
use crate::error::AppError;
use crate::handlers::{JsonBody, MessageResponse, RecordResponse};
use crate::AppState;

/// Response body for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer token for `Authorization: Bearer <token>`
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: User,
    pub message: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterUser>,
) -> Result<(StatusCode, Json<RecordResponse<User>>), AppError> {
    let user = state.auth_service.register(request).await?;

    Ok((
        StatusCode::CREATED,
        RecordResponse::new("Registration successful! Please login.", user),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginCredentials>,
) -> Result<Json<LoginResponse>, AppError> {
    let outcome = state.auth_service.login(request).await?;

    Ok(Json(LoginResponse {
        message: format!("Welcome back, {}!", outcome.user.name),
        token: outcome.token,
        expires_at: outcome.expires_at,
        user: outcome.user,
    }))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    Extension(SessionToken(token)): Extension<SessionToken>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.logout(&token).await?;
    Ok(MessageResponse::new("You have been logged out successfully"))
}

/// GET /auth/me
pub async fn me(Extension(user): Extension<User>) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_register_request() {
        let json = r#"{
            "name": "Asha",
            "branch": "CSE",
            "year": 2,
            "phone": "9000000001",
            "password": "hunter22",
            "role": "student"
        }"#;
        let request: RegisterUser = serde_json::from_str(json).unwrap();
        assert_eq!(request.name.as_deref(), Some("Asha"));
        assert_eq!(request.year, Some(2));
        assert!(request.secret_code.is_none());
    }

    #[test]
    fn parse_login_request_minimal() {
        let request: LoginCredentials = serde_json::from_str("{}").unwrap();
        assert!(request.role.is_none());
        assert!(request.phone.is_none());
    }

    #[test]
    fn user_serialization_hides_password_hash() {
        let user = crate::test_utils::test_user(crate::domain::entities::Role::Student);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "student");
    }
}
