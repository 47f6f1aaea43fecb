//! Shared handler state: the ports behind `Arc<dyn Trait>`.

use std::sync::Arc;

use crate::domain::ports::{
    FavoriteRepository, PasswordHasher, ReviewRepository, ShelterStore, TokenService,
    UserRepository,
};

/// Everything the HTTP handlers need, injected once at wiring time.
///
/// Handlers never see concrete adapters, so tests swap in mocks or
/// in-memory implementations without touching routing.
#[derive(Clone)]
pub struct HttpState {
    /// Dynamic shelter-table access.
    pub shelters: Arc<dyn ShelterStore>,
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Favorites ledger.
    pub favorites: Arc<dyn FavoriteRepository>,
    /// Review store.
    pub reviews: Arc<dyn ReviewRepository>,
    /// Token issuance and verification.
    pub tokens: Arc<dyn TokenService>,
    /// Password hashing.
    pub passwords: Arc<dyn PasswordHasher>,
}
