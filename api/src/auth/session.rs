//! Bearer session middleware

use std::sync::Arc;

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::app::AuthService;
use crate::domain::ports::{SessionRepository, UserRepository};
use crate::error::AppError;

/// The raw bearer token of the current request, needed to end the session
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

/// Extract the token from the Authorization header
fn extract_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware
///
/// Resolves the session token and injects the `User` and `SessionToken`
/// into request extensions. Unknown or expired sessions get a 401.
pub async fn auth_middleware<UR, SR>(
    State(auth): State<Arc<AuthService<UR, SR>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError>
where
    UR: UserRepository + 'static,
    SR: SessionRepository + 'static,
{
    let token = extract_token(&request)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = auth
        .authenticate(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");

    request.extensions_mut().insert(user);
    request.extensions_mut().insert(SessionToken(token));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Extension, Router};
    use chrono::Duration;
    use tower::ServiceExt;
    use tower_http::services::ServeDir;

    use crate::app::LoginCredentials;
    use crate::domain::entities::{Role, User};
    use crate::test_utils::{
        test_user, InMemorySessionRepository, InMemoryUserRepository, TEST_PASSWORD,
    };

    type Auth = AuthService<InMemoryUserRepository, InMemorySessionRepository>;

    fn auth_service(user: &User, session_ttl: Duration) -> Arc<Auth> {
        Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new().with_user(user.clone())),
            Arc::new(InMemorySessionRepository::new()),
            "secret".to_string(),
            session_ttl,
        ))
    }

    async fn token_for(auth: &Auth, user: &User) -> String {
        auth.login(LoginCredentials {
            role: Some("student".to_string()),
            phone: Some(user.phone.clone()),
            password: Some(TEST_PASSWORD.to_string()),
            secret_code: None,
        })
        .await
        .unwrap()
        .token
    }

    fn protected_app(auth: Arc<Auth>, uploads: &std::path::Path) -> Router {
        Router::new()
            .route(
                "/dashboard",
                get(|Extension(user): Extension<User>| async move { user.name }),
            )
            .nest_service("/uploads", ServeDir::new(uploads))
            .layer(middleware::from_fn_with_state(
                auth,
                auth_middleware::<InMemoryUserRepository, InMemorySessionRepository>,
            ))
    }

    async fn get_status(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    fn uploads_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("notes/syllabus.txt"), b"week one").unwrap();
        dir
    }

    #[tokio::test]
    async fn routes_and_uploads_need_a_token() {
        let user = test_user(Role::Student);
        let dir = uploads_dir();
        let app = protected_app(auth_service(&user, Duration::hours(1)), dir.path());

        let (status, body) = get_status(app.clone(), "/dashboard", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Unauthorized");

        let (status, _) = get_status(app.clone(), "/uploads/notes/syllabus.txt", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = get_status(app, "/dashboard", Some("not-a-session")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_session_is_rejected() {
        let user = test_user(Role::Student);
        let dir = uploads_dir();
        let auth = auth_service(&user, Duration::seconds(-1));
        let token = token_for(&auth, &user).await;
        let app = protected_app(auth, dir.path());

        let (status, _) = get_status(app.clone(), "/dashboard", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = get_status(app, "/uploads/notes/syllabus.txt", Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_session_reaches_routes_and_uploads() {
        let user = test_user(Role::Student);
        let dir = uploads_dir();
        let auth = auth_service(&user, Duration::hours(1));
        let token = token_for(&auth, &user).await;
        let app = protected_app(auth, dir.path());

        let (status, body) = get_status(app.clone(), "/dashboard", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user.name.as_bytes());

        let (status, body) = get_status(app, "/uploads/notes/syllabus.txt", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"week one");
    }

    fn request_with(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/dashboard");
        if let Some(value) = header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn extracts_bearer_token() {
        let request = request_with(Some("Bearer abc123"));
        assert_eq!(extract_token(&request), Some("abc123"));
    }

    #[test]
    fn rejects_missing_or_other_schemes() {
        assert_eq!(extract_token(&request_with(None)), None);
        assert_eq!(extract_token(&request_with(Some("Basic abc123"))), None);
        assert_eq!(extract_token(&request_with(Some("Bearer    "))), None);
    }
}
