//! HTTP mapping for domain errors.
//!
//! Keeps [`DomainError`] transport-agnostic while giving every handler a
//! uniform JSON envelope `{code, message, details?, request_id?}` and
//! consistent status codes. Internal errors are redacted before they
//! reach the wire; the full message stays in the logs.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::error::{DomainError, ErrorCode};
use crate::domain::ports::{
    FavoriteRepositoryError, PasswordHashError, ReviewRepositoryError, ShelterStoreError,
    TokenError, UserRepositoryError,
};
use crate::middleware::RequestId;

/// Result alias used by every handler.
pub type ApiResult<T> = Result<T, DomainError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
struct Envelope<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let request_id = RequestId::current().map(|id| id.to_string());
        let (message, details) = if self.code() == ErrorCode::InternalError {
            error!(message = %self.message(), "internal error served to client");
            ("internal server error", None)
        } else {
            (self.message(), self.details())
        };
        HttpResponse::build(self.status_code()).json(Envelope {
            code: self.code(),
            message,
            details,
            request_id,
        })
    }
}

impl From<ShelterStoreError> for DomainError {
    fn from(error: ShelterStoreError) -> Self {
        DomainError::internal(error.to_string())
    }
}

impl From<UserRepositoryError> for DomainError {
    fn from(error: UserRepositoryError) -> Self {
        match error {
            UserRepositoryError::DuplicateEmail => {
                DomainError::conflict("email is already registered")
            }
            other => DomainError::internal(other.to_string()),
        }
    }
}

impl From<FavoriteRepositoryError> for DomainError {
    fn from(error: FavoriteRepositoryError) -> Self {
        DomainError::internal(error.to_string())
    }
}

impl From<ReviewRepositoryError> for DomainError {
    fn from(error: ReviewRepositoryError) -> Self {
        DomainError::internal(error.to_string())
    }
}

impl From<TokenError> for DomainError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Expired => DomainError::unauthorized("token expired"),
            TokenError::Invalid | TokenError::WrongKind => {
                DomainError::unauthorized("invalid token")
            }
            TokenError::Issuance { message } => DomainError::internal(message),
        }
    }
}

impl From<PasswordHashError> for DomainError {
    fn from(error: PasswordHashError) -> Self {
        DomainError::internal(error.to_string())
    }
}
