//! Port for the append-only review store.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::kind::ShelterKind;
use crate::domain::review::{NewReview, Review};

/// One page of reviews plus the total count for pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPage {
    /// Reviews on this page, most recent first.
    pub items: Vec<Review>,
    /// Total number of reviews for the `(kind, shelter_id)` pair.
    pub total: i64,
}

/// Errors raised by review repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewRepositoryError {
    /// Storage connection could not be established.
    #[error("review repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("review repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl ReviewRepositoryError {
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

/// Port for appending and listing reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Append a review and return the stored row.
    async fn insert(&self, review: &NewReview) -> Result<Review, ReviewRepositoryError>;

    /// List reviews for one shelter, most recent first, with the total.
    async fn list_page(
        &self,
        kind: ShelterKind,
        shelter_id: i64,
        page: PageRequest,
    ) -> Result<ReviewPage, ReviewRepositoryError>;
}
