//! Favorites: `(user, kind, shelter_id)` tuples with idempotent adds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::kind::ShelterKind;

/// A stored favorite row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Primary key.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Shelter kind; always stored together with the id because shelter
    /// ids are only unique within a kind.
    pub shelter_type: ShelterKind,
    /// Shelter id within the kind's table.
    pub shelter_id: i64,
    /// When the favorite was recorded.
    pub created_at: DateTime<Utc>,
}

/// Outcome of an add-favorite request.
///
/// Adding an existing favorite is success, not an error: the unique
/// constraint resolves the duplicate (including the concurrent-add race)
/// and both callers observe `ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFavoriteOutcome {
    /// A new row was inserted.
    Created {
        /// Id of the inserted favorite.
        favorite_id: i32,
    },
    /// The tuple was already present; nothing changed.
    AlreadyFavorited,
}
