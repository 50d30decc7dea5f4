//! Upload policy
//!
//! Extension allow-list, filename sanitising, and the naming scheme for stored files.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Extensions accepted for any attachment (compared lowercase)
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "doc", "docx", "ppt", "pptx", "xls", "xlsx", "mp4",
    "avi", "mov",
];

/// A file received in a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Name as sent by the client
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Lowercase extension after the last dot, if any
pub fn file_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

pub fn is_allowed(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.-]").expect("static regex"))
}

/// Reduce a client-supplied name to a safe basename.
///
/// Path components are dropped, whitespace becomes `_`, anything outside
/// `[A-Za-z0-9_.-]` is removed, and leading dots/underscores are trimmed.
/// Returns `None` when nothing usable is left.
pub fn secure_filename(raw: &str) -> Option<String> {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let joined = basename.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = unsafe_chars().replace_all(&joined, "");
    let trimmed = cleaned.trim_start_matches(['.', '_']).trim_end_matches('.');

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Name a file is stored under: `{YYYYmmdd_HHMMSS}_{owner}_{safe_name}`
pub fn stored_name(at: DateTime<Utc>, owner: &str, safe_name: &str) -> String {
    format!("{}_{}_{}", at.format("%Y%m%d_%H%M%S"), owner, safe_name)
}
