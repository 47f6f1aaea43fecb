//! Port for bearer token issuance and verification.
//!
//! The domain treats tokens as a capability: given a token, resolve a
//! user id or fail. Signing scheme and claims layout belong to the
//! adapter.

use crate::domain::auth::TokenKind;

/// Errors raised by token service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The token's signature or structure is invalid.
    #[error("invalid token")]
    Invalid,
    /// The token expired.
    #[error("token expired")]
    Expired,
    /// A token of the wrong kind was presented (e.g. a refresh token
    /// used as a bearer credential).
    #[error("wrong token type")]
    WrongKind,
    /// Token creation failed inside the adapter.
    #[error("token issuance failed: {message}")]
    Issuance {
        /// Adapter-supplied description.
        message: String,
    },
}

impl TokenError {
    /// Create an issuance error with the given message.
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }
}

/// Port for issuing and verifying access/refresh tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token of the given kind for a user.
    fn issue(&self, user_id: i32, kind: TokenKind) -> Result<String, TokenError>;

    /// Verify a token, enforcing its kind, and return the user id.
    fn verify(&self, token: &str, expected: TokenKind) -> Result<i32, TokenError>;
}
