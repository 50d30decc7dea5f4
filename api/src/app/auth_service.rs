//! Auth service
//!
//! Handles registration, login, logout and bearer-token authentication.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::app::validation::{duplicate_as, present};
use crate::domain::entities::{NewSession, NewUser, Role, User};
use crate::domain::ports::{SessionRepository, UserRepository};
use crate::error::{AppError, DomainError};

const INVALID_LOGIN: &str = "Invalid phone number, password, or role selection";
const PHONE_TAKEN: &str = "Phone number already registered";

/// Registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterUser {
    pub name: Option<String>,
    pub branch: Option<String>,
    pub year: Option<i32>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub secret_code: Option<String>,
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginCredentials {
    pub role: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub secret_code: Option<String>,
}

/// A successful login. The token is only ever returned here.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Service for accounts and sessions
pub struct AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    users: Arc<UR>,
    sessions: Arc<SR>,
    teacher_secret_code: String,
    session_ttl: Duration,
}

impl<UR, SR> AuthService<UR, SR>
where
    UR: UserRepository,
    SR: SessionRepository,
{
    pub fn new(
        users: Arc<UR>,
        sessions: Arc<SR>,
        teacher_secret_code: String,
        session_ttl: Duration,
    ) -> Self {
        Self {
            users,
            sessions,
            teacher_secret_code,
            session_ttl,
        }
    }

    /// Register a student or teacher account
    pub async fn register(&self, form: RegisterUser) -> Result<User, AppError> {
        let (Some(name), Some(branch), Some(phone), Some(password), Some(role)) = (
            present(&form.name),
            present(&form.branch),
            present(&form.phone),
            form.password.clone().filter(|p| !p.is_empty()),
            present(&form.role),
        ) else {
            return Err(validation("Please fill all required fields"));
        };

        let role: Role = role.parse().map_err(DomainError::Validation)?;
        if role == Role::Admin {
            return Err(DomainError::Forbidden(
                "Admin accounts cannot be registered".to_string(),
            )
            .into());
        }

        let year = match role {
            Role::Student => match form.year {
                Some(year) if year > 0 => Some(year),
                _ => return Err(validation("Year is required for students")),
            },
            _ => None,
        };

        if role == Role::Teacher && !self.secret_code_matches(&form.secret_code) {
            return Err(validation("Invalid secret code for teacher registration"));
        }

        if self.users.find_by_phone(&phone).await?.is_some() {
            return Err(DomainError::AlreadyExists(PHONE_TAKEN.to_string()).into());
        }

        let user = self
            .users
            .create(&NewUser {
                name,
                branch: Some(branch),
                year,
                phone,
                password_hash: hash_password(&password)?,
                role,
            })
            .await
            .map_err(duplicate_as(PHONE_TAKEN))?;

        tracing::info!(user_id = %user.id, role = %user.role, "Registered user");
        Ok(user)
    }

    /// Verify credentials and open a session
    pub async fn login(&self, credentials: LoginCredentials) -> Result<LoginOutcome, AppError> {
        let (Some(role), Some(phone), Some(password)) = (
            present(&credentials.role),
            present(&credentials.phone),
            credentials.password.clone().filter(|p| !p.is_empty()),
        ) else {
            return Err(validation("Please fill all required fields"));
        };

        let role: Role = role
            .parse()
            .map_err(|_| DomainError::Unauthorized(INVALID_LOGIN.to_string()))?;

        if role == Role::Teacher && !self.secret_code_matches(&credentials.secret_code) {
            return Err(DomainError::Unauthorized(
                "Invalid secret code for teacher login".to_string(),
            )
            .into());
        }

        let user = match self.users.find_by_phone_and_role(&phone, role).await? {
            Some(user) if verify_password(&password, &user.password_hash) => user,
            _ => {
                tracing::warn!(role = %role, "Rejected login attempt");
                return Err(DomainError::Unauthorized(INVALID_LOGIN.to_string()).into());
            }
        };

        let now = Utc::now();
        match self.sessions.delete_expired(now).await {
            Ok(purged) if purged > 0 => tracing::debug!(purged, "Purged expired sessions"),
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "Failed to purge expired sessions"),
        }

        let token = generate_session_token();
        let expires_at = now + self.session_ttl;
        self.sessions
            .create(&NewSession {
                user_id: user.id,
                token_hash: hash_token(&token),
                expires_at,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LoginOutcome {
            user,
            token,
            expires_at,
        })
    }

    /// End the session belonging to `token`
    pub async fn logout(&self, token: &str) -> Result<(), AppError> {
        let removed = self.sessions.delete_by_token_hash(&hash_token(token)).await?;
        if !removed {
            tracing::debug!("Logout for unknown session");
        }
        Ok(())
    }

    /// Resolve a bearer token to its user, if the session is still valid
    pub async fn authenticate(&self, token: &str) -> Result<Option<User>, AppError> {
        let token_hash = hash_token(token);
        let Some(session) = self.sessions.find_by_token_hash(&token_hash).await? else {
            return Ok(None);
        };

        if session.is_expired(Utc::now()) {
            self.sessions.delete_by_token_hash(&token_hash).await?;
            return Ok(None);
        }

        Ok(self.users.find_by_id(&session.user_id).await?)
    }

    /// Create the admin account when none exists. Returns whether one was created.
    pub async fn ensure_admin(&self, phone: &str, password: &str) -> Result<bool, AppError> {
        if self.users.exists_with_role(Role::Admin).await? {
            return Ok(false);
        }

        let admin = self
            .users
            .create(&NewUser {
                name: "Admin".to_string(),
                branch: None,
                year: None,
                phone: phone.to_string(),
                password_hash: hash_password(password)?,
                role: Role::Admin,
            })
            .await?;

        tracing::info!(user_id = %admin.id, "Created admin user");
        Ok(true)
    }

    fn secret_code_matches(&self, code: &Option<String>) -> bool {
        code.as_deref() == Some(self.teacher_secret_code.as_str())
    }
}

fn validation(msg: &str) -> AppError {
    DomainError::Validation(msg.to_string()).into()
}

/// Hash a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
}

/// Check a password against a stored PHC string
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Generate a random session token
fn generate_session_token() -> String {
    let token: [u8; 32] = rand::thread_rng().gen();
    hex::encode(token)
}

/// Hash a session token for storage
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
