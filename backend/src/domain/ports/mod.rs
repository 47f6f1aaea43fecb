//! Ports: the traits outbound adapters implement.
//!
//! Handlers depend only on these traits (via `Arc<dyn Port>`), keeping
//! the HTTP layer testable without a database or a signing key.

mod favorite_repository;
mod password_hasher;
mod review_repository;
mod shelter_store;
mod token_service;
mod user_repository;

pub use favorite_repository::{FavoriteRepository, FavoriteRepositoryError};
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use review_repository::{ReviewPage, ReviewRepository, ReviewRepositoryError};
pub use shelter_store::{ShelterStore, ShelterStoreError};
pub use token_service::{TokenError, TokenService};
pub use user_repository::{UserCredentials, UserRepository, UserRepositoryError};

#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
#[cfg(test)]
pub use review_repository::MockReviewRepository;
#[cfg(test)]
pub use shelter_store::MockShelterStore;
#[cfg(test)]
pub use user_repository::MockUserRepository;
