//! Port for password hashing and verification.
//!
//! Only hashed verification exists; there is no plain-comparison path.

/// Errors raised by password hashing adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing or verification machinery failed (malformed stored hash,
    /// parameter errors). Distinct from a simple mismatch, which is a
    /// normal `Ok(false)` verification result.
    #[error("password hashing failed: {message}")]
    Hashing {
        /// Adapter-supplied description.
        message: String,
    },
}

impl PasswordHashError {
    /// Create a hashing error with the given message.
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

/// Port for deriving and checking password hashes.
pub trait PasswordHasher: Send + Sync {
    /// Hash a password for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError>;
}
