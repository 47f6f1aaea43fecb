//! Shared fixtures for handler tests.

use std::sync::Arc;

use crate::domain::ports::{
    MockFavoriteRepository, MockReviewRepository, MockShelterStore, MockUserRepository,
};
use crate::outbound::auth::{Argon2PasswordHasher, JwtTokenService, TokenTtl};

use super::state::HttpState;

/// A state whose repositories are expectation-free mocks (any call
/// panics) and whose token/password services are the real adapters with
/// a test key. Tests replace the ports they exercise.
pub fn test_state() -> HttpState {
    HttpState {
        shelters: Arc::new(MockShelterStore::new()),
        users: Arc::new(MockUserRepository::new()),
        favorites: Arc::new(MockFavoriteRepository::new()),
        reviews: Arc::new(MockReviewRepository::new()),
        tokens: Arc::new(JwtTokenService::new(b"handler-test-key", TokenTtl::default())),
        passwords: Arc::new(Argon2PasswordHasher),
    }
}
