//! User accounts and signup validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// A registered user.
///
/// The password hash never leaves the persistence boundary; this entity
/// is what handlers and tokens see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key.
    pub id: i32,
    /// Unique login email.
    pub email: String,
    /// Age in years.
    pub age: i32,
    /// Health-type code agreed with the clients, 1 through 9.
    pub health_type: i32,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Validated signup payload, ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Unique login email.
    pub email: String,
    /// Argon2id hash of the supplied password.
    pub password_hash: String,
    /// Age in years.
    pub age: i32,
    /// Health-type code, 1 through 9.
    pub health_type: i32,
}

/// Validate the raw signup fields, before hashing the password.
///
/// Rules (matching the client contract): non-empty email containing an
/// `@`, non-empty password, `0 < age < 150`, `1 <= health_type <= 9`.
pub fn validate_signup(
    email: &str,
    password: &str,
    age: i64,
    health_type: i64,
) -> Result<(), DomainError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(DomainError::invalid_request("a valid email is required"));
    }
    if password.trim().is_empty() {
        return Err(DomainError::invalid_request("password must not be empty"));
    }
    if !(1..150).contains(&age) {
        return Err(DomainError::invalid_request("age must be within 1..=149"));
    }
    if !(1..=9).contains(&health_type) {
        return Err(DomainError::invalid_request(
            "health_type must be within 1..=9",
        ));
    }
    Ok(())
}
