use std::env;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Root directory for uploaded files (one subdirectory per category)
    pub upload_dir: PathBuf,
    /// Request body cap, applies to every multipart upload
    pub max_upload_bytes: usize,
    /// Per-image cap for lost & found attachments
    pub max_image_bytes: usize,
    /// Code teachers must present to register or log in
    pub teacher_secret_code: String,
    pub session_ttl_hours: i64,
    /// Credentials of the admin account seeded on first start
    pub admin_phone: String,
    pub admin_password: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/uploads")),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
            max_image_bytes: parse_var("MAX_IMAGE_BYTES", 5 * 1024 * 1024)?,
            teacher_secret_code: env::var("TEACHER_SECRET_CODE")
                .unwrap_or_else(|_| "TEACHER123".to_string()),
            session_ttl_hours: parse_var("SESSION_TTL_HOURS", 24)?,
            admin_phone: env::var("ADMIN_PHONE").unwrap_or_else(|_| "0000000000".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}
