//! Form field helpers shared by the services

use chrono::NaiveDate;

use crate::domain::entities::User;
use crate::error::DomainError;

/// Trimmed value of an optional field, `None` when absent or blank
pub fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::Validation("Invalid date format".to_string()))
}

/// Parse an optional `YYYY-MM-DD` date; blank means absent
pub fn parse_optional_date(raw: &Option<String>) -> Result<Option<NaiveDate>, DomainError> {
    present(raw).map(|d| parse_date(&d)).transpose()
}

/// Reject non-admin actors with `msg`
pub fn require_admin(actor: &User, msg: &str) -> Result<(), DomainError> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden(msg.to_string()))
    }
}

/// Replace a storage-level uniqueness error with a user-facing message
pub fn duplicate_as(msg: &'static str) -> impl FnOnce(DomainError) -> DomainError {
    move |e| match e {
        DomainError::AlreadyExists(_) => DomainError::AlreadyExists(msg.to_string()),
        other => other,
    }
}
