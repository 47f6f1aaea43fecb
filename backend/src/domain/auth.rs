//! Token vocabulary shared between the domain and the JWT adapter.

use serde::{Deserialize, Serialize};

/// Discriminates access tokens from refresh tokens.
///
/// A refresh token presented where an access token is expected (or vice
/// versa) is an authentication failure, not a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token authorising API calls.
    Access,
    /// Long-lived token exchanged for new access tokens.
    Refresh,
}

/// The token pair issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token for `POST /auth/refresh`.
    pub refresh_token: String,
}
