//! Port over the heterogeneous shelter tables.
//!
//! One implementation exists in production (the dynamic SQL store built
//! on the startup schema catalog); tests substitute mocks or in-memory
//! stores.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::kind::ShelterKind;
use crate::domain::shelter::{NearbyQuery, NearbyShelter, ShelterSummary};

/// Errors raised by shelter store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShelterStoreError {
    /// Storage connection could not be established.
    #[error("shelter store connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query failed during execution.
    #[error("shelter store query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl ShelterStoreError {
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

/// Read-side port over the per-kind shelter tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShelterStore: Send + Sync {
    /// Run the multi-kind proximity search.
    ///
    /// Results are sorted by ascending distance (ties: kind, then id)
    /// and truncated to the query's limit. An empty kind set must return
    /// an empty list without touching storage.
    async fn search_nearby(
        &self,
        query: &NearbyQuery,
    ) -> Result<Vec<NearbyShelter>, ShelterStoreError>;

    /// Fetch one shelter's full native row, in its kind-specific shape.
    ///
    /// Returns `None` for missing rows and for kinds whose table has no
    /// native id column.
    async fn fetch_detail(
        &self,
        kind: ShelterKind,
        id: i64,
    ) -> Result<Option<Value>, ShelterStoreError>;

    /// Keyed existence check, cheaper than a full projection.
    async fn exists(&self, kind: ShelterKind, id: i64) -> Result<bool, ShelterStoreError>;

    /// Batch-resolve uniform summaries for a set of ids of one kind.
    ///
    /// Ids with no backing row are simply absent from the result map.
    async fn summaries_by_ids(
        &self,
        kind: ShelterKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, ShelterSummary>, ShelterStoreError>;
}
