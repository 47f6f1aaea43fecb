//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Claims carry the user id in `sub` and the token kind in `typ`, so a
//! refresh token can never be replayed as a bearer credential even
//! though both are signed with the same key.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::auth::TokenKind;
use crate::domain::ports::{TokenError, TokenService};

/// Lifetimes for the two token kinds.
#[derive(Debug, Clone, Copy)]
pub struct TokenTtl {
    /// Access token lifetime in seconds.
    pub access_secs: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_secs: i64,
}

impl Default for TokenTtl {
    fn default() -> Self {
        Self {
            access_secs: 2 * 60 * 60,
            refresh_secs: 7 * 24 * 60 * 60,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    typ: TokenKind,
    iat: i64,
    exp: i64,
}

/// JWT-backed [`TokenService`].
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TokenTtl,
}

impl JwtTokenService {
    /// Create a service signing with the given secret.
    pub fn new(secret: &[u8], ttl: TokenTtl) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    fn lifetime(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => Duration::seconds(self.ttl.access_secs),
            TokenKind::Refresh => Duration::seconds(self.ttl.refresh_secs),
        }
    }
}

fn map_decode_error(error: &jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: i32, kind: TokenKind) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            typ: kind,
            iat: now.timestamp(),
            exp: (now + self.lifetime(kind)).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::issuance(e.to_string()))
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<i32, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| map_decode_error(&e))?;
        if data.claims.typ != expected {
            return Err(TokenError::WrongKind);
        }
        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| TokenError::Invalid)
    }
}
