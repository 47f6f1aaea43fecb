//! Port for the favorites ledger.

use async_trait::async_trait;
use pagination::PageWindow;

use crate::domain::favorite::{AddFavoriteOutcome, Favorite};
use crate::domain::kind::ShelterKind;

/// Errors raised by favorite repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FavoriteRepositoryError {
    /// Storage connection could not be established.
    #[error("favorite repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("favorite repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl FavoriteRepositoryError {
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

/// Port for recording, removing, and listing favorites.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Record a favorite.
    ///
    /// Idempotent: the `(user_id, shelter_type, shelter_id)` unique
    /// constraint resolves duplicates (and the concurrent-add race)
    /// atomically; a violation maps to
    /// [`AddFavoriteOutcome::AlreadyFavorited`], not an error.
    async fn add(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<AddFavoriteOutcome, FavoriteRepositoryError>;

    /// Delete a favorite, returning the number of rows removed (0 or 1).
    /// Removing an absent favorite is not an error.
    async fn remove(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<u64, FavoriteRepositoryError>;

    /// List a user's favorites, most recent first.
    async fn list_page(
        &self,
        user_id: i32,
        window: PageWindow,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError>;
}
