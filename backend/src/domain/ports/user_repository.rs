//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::user::{NewUser, User};

/// A user together with the stored password hash, for login checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// The account.
    pub user: User,
    /// Argon2id hash stored at signup.
    pub password_hash: String,
}

/// Errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The email is already registered.
    #[error("email already registered")]
    DuplicateEmail,
    /// Storage connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl UserRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for creating and looking up user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    ///
    /// The unique index on `email` is the authority on duplicates; a
    /// violation surfaces as [`UserRepositoryError::DuplicateEmail`].
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Look up an account and its password hash by email.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError>;

    /// Look up an account by primary key.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError>;
}
