//! Pagination primitives shared by the shelter API endpoints.
//!
//! Two styles are in use on the wire and both are modelled here:
//!
//! - [`PageWindow`]: `limit`/`offset` windows (favorites listing). The
//!   limit is clamped to a ceiling rather than rejected, matching the
//!   forgiving behaviour expected from loose clients.
//! - [`PageRequest`]: one-based `page`/`size` requests (review listing).
//!   Out-of-range values are clamped into the documented bounds.

use serde::{Deserialize, Serialize};

/// Hard ceiling applied to every window or page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A `limit`/`offset` window over a recency-ordered collection.
///
/// Invariants after construction:
/// - `1 <= limit <= MAX_PAGE_SIZE`
/// - `offset >= 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    limit: i64,
    offset: i64,
}

impl PageWindow {
    /// Default window size when the client does not supply a limit.
    pub const DEFAULT_LIMIT: i64 = 20;

    /// Build a window from raw client input, clamping into bounds.
    #[must_use]
    pub fn clamped(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, MAX_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);
        Self { limit, offset }
    }

    /// Number of rows requested.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of rows skipped before the window starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset
    }
}

/// A one-based `page`/`size` request.
///
/// Invariants after construction:
/// - `page >= 1`
/// - `1 <= size <= MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /// Default page size when the client does not supply one.
    pub const DEFAULT_SIZE: i64 = 10;

    /// Build a request from raw client input, clamping into bounds.
    #[must_use]
    pub fn clamped(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let size = size.unwrap_or(Self::DEFAULT_SIZE).clamp(1, MAX_PAGE_SIZE);
        Self { page, size }
    }

    /// One-based page index.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Offset of the first row on this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}
