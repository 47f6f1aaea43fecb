//! PostgreSQL-backed [`FavoriteRepository`] using Diesel.
//!
//! The `(user_id, shelter_type, shelter_id)` unique constraint is the
//! concurrency-safety mechanism: two simultaneous adds race on the
//! insert, exactly one row survives, and the loser's unique violation is
//! mapped to the idempotent "already favorited" outcome.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use pagination::PageWindow;
use tracing::debug;

use crate::domain::favorite::{AddFavoriteOutcome, Favorite};
use crate::domain::kind::ShelterKind;
use crate::domain::ports::{FavoriteRepository, FavoriteRepositoryError};

use super::models::{FavoriteRow, NewFavoriteRow};
use super::pool::{DbPool, PoolError};
use super::schema::favorites;

/// Diesel implementation of the [`FavoriteRepository`] port.
#[derive(Clone)]
pub struct DieselFavoriteRepository {
    pool: DbPool,
}

impl DieselFavoriteRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FavoriteRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            FavoriteRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: DieselError) -> FavoriteRepositoryError {
    debug!(error = %error, "favorite query failed");
    FavoriteRepositoryError::query("database error")
}

fn row_to_favorite(row: FavoriteRow) -> Result<Favorite, FavoriteRepositoryError> {
    let shelter_type = ShelterKind::parse(&row.shelter_type).ok_or_else(|| {
        FavoriteRepositoryError::query(format!(
            "favorite {} carries unknown shelter_type {}",
            row.id, row.shelter_type
        ))
    })?;
    Ok(Favorite {
        id: row.id,
        user_id: row.user_id,
        shelter_type,
        shelter_id: row.shelter_id,
        created_at: row.created_at,
    })
}

#[async_trait]
impl FavoriteRepository for DieselFavoriteRepository {
    async fn add(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<AddFavoriteOutcome, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::insert_into(favorites::table)
            .values(NewFavoriteRow {
                user_id,
                shelter_type: kind.as_str(),
                shelter_id,
            })
            .returning(favorites::id)
            .get_result::<i32>(&mut conn)
            .await;
        match inserted {
            Ok(favorite_id) => Ok(AddFavoriteOutcome::Created { favorite_id }),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(AddFavoriteOutcome::AlreadyFavorited)
            }
            Err(other) => Err(map_diesel_error(other)),
        }
    }

    async fn remove(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<u64, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            favorites::table
                .filter(favorites::user_id.eq(user_id))
                .filter(favorites::shelter_type.eq(kind.as_str()))
                .filter(favorites::shelter_id.eq(shelter_id)),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(removed as u64)
    }

    async fn list_page(
        &self,
        user_id: i32,
        window: PageWindow,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<FavoriteRow> = favorites::table
            .filter(favorites::user_id.eq(user_id))
            .order(favorites::created_at.desc())
            .limit(window.limit())
            .offset(window.offset())
            .select(FavoriteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_favorite).collect()
    }
}
