//! Identity endpoints: signup, login, refresh, and the bearer-token
//! request extractor.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, get, post, web};
use futures_util::future::{Ready, ready};
use serde::{Deserialize, Serialize};

use crate::domain::auth::{TokenKind, TokenPair};
use crate::domain::error::DomainError;
use crate::domain::ports::{PasswordHasher as _, TokenService as _, UserRepository as _};
use crate::domain::user::{NewUser, User, validate_signup};

use super::error::ApiResult;
use super::state::HttpState;

/// The authenticated caller, resolved from the `Authorization` header.
///
/// Extraction verifies an access token; refresh tokens are rejected
/// here, they are only accepted by [`refresh`].
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    /// Verified user id from the token subject.
    pub user_id: i32,
}

fn authenticate(req: &HttpRequest) -> Result<AuthedUser, DomainError> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| DomainError::internal("http state not configured"))?;
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| DomainError::unauthorized("missing bearer token"))?;
    let user_id = state.tokens.verify(token, TokenKind::Access)?;
    Ok(AuthedUser { user_id })
}

impl FromRequest for AuthedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SignupRequest {
    email: String,
    password: String,
    age: i64,
    health_type: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
    user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct RefreshResponse {
    access_token: String,
}

/// `POST /auth/signup`
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    body: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    validate_signup(&body.email, &body.password, body.age, body.health_type)?;
    let password_hash = state.passwords.hash(&body.password)?;
    let user = state
        .users
        .insert(&NewUser {
            email: body.email.trim().to_owned(),
            password_hash,
            // Ranges were just validated; the casts cannot truncate.
            age: body.age as i32,
            health_type: body.health_type as i32,
        })
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// `POST /auth/login`
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let credentials = state
        .users
        .find_by_email(body.email.trim())
        .await?
        .ok_or_else(|| DomainError::unauthorized("invalid email or password"))?;
    if !state
        .passwords
        .verify(&body.password, &credentials.password_hash)?
    {
        return Err(DomainError::unauthorized("invalid email or password"));
    }
    let user = credentials.user;
    let pair = TokenPair {
        access_token: state.tokens.issue(user.id, TokenKind::Access)?,
        refresh_token: state.tokens.issue(user.id, TokenKind::Refresh)?,
    };
    Ok(HttpResponse::Ok().json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        user,
    }))
}

/// `POST /auth/refresh`
#[post("/auth/refresh")]
pub async fn refresh(
    state: web::Data<HttpState>,
    body: web::Json<RefreshRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = state
        .tokens
        .verify(&body.refresh_token, TokenKind::Refresh)?;
    let access_token = state.tokens.issue(user_id, TokenKind::Access)?;
    Ok(HttpResponse::Ok().json(RefreshResponse { access_token }))
}

/// `GET /auth/me`
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, caller: AuthedUser) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(caller.user_id)
        .await?
        .ok_or_else(|| DomainError::unauthorized("account no longer exists"))?;
    Ok(HttpResponse::Ok().json(user))
}
