//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use uuid::Uuid;

use crate::app::auth_service::hash_password;
use crate::domain::entities::{Role, Student, StudentId, User, UserId};

/// Password every fixture user can log in with
pub const TEST_PASSWORD: &str = "correct horse battery staple";

static NEXT_PHONE: AtomicU64 = AtomicU64::new(1);

/// Argon2 is slow in debug builds, so hash once per test binary
fn test_password_hash() -> String {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_PASSWORD).unwrap()).clone()
}

fn unique_phone() -> String {
    format!("9{:09}", NEXT_PHONE.fetch_add(1, Ordering::Relaxed))
}

/// Create a test user with the given role and a unique phone number
pub fn test_user(role: Role) -> User {
    User {
        id: UserId(Uuid::new_v4()),
        name: format!("Test {}", role.title()),
        branch: Some("CSE".to_string()),
        year: (role == Role::Student).then_some(2),
        phone: unique_phone(),
        password_hash: test_password_hash(),
        role,
        created_at: Utc::now(),
    }
}

/// Create a roster student with the given roll number
pub fn test_student(roll_number: &str) -> Student {
    Student {
        id: StudentId(Uuid::new_v4()),
        name: format!("Test Student {}", roll_number),
        branch: "CSE".to_string(),
        year: 2,
        roll_number: roll_number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::auth_service::verify_password;

    #[test]
    fn fixture_users_have_distinct_phones() {
        let a = test_user(Role::Student);
        let b = test_user(Role::Student);
        assert_ne!(a.phone, b.phone);
        assert_eq!(a.phone.len(), 10);
    }

    #[test]
    fn fixture_password_verifies() {
        let user = test_user(Role::Teacher);
        assert!(verify_password(TEST_PASSWORD, &user.password_hash));
        assert_eq!(user.year, None);
    }
}
