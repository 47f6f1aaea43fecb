//! PostgreSQL-backed [`ReviewRepository`] using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;
use tracing::debug;

use crate::domain::kind::ShelterKind;
use crate::domain::ports::{ReviewPage, ReviewRepository, ReviewRepositoryError};
use crate::domain::review::{NewReview, Rating, Review};

use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::shelter_reviews;

/// Diesel implementation of the [`ReviewRepository`] port.
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ReviewRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewRepositoryError {
    debug!(error = %error, "review query failed");
    ReviewRepositoryError::query("database error")
}

fn row_to_review(row: ReviewRow) -> Result<Review, ReviewRepositoryError> {
    let kind = ShelterKind::parse(&row.shelter_type).ok_or_else(|| {
        ReviewRepositoryError::query(format!(
            "review {} carries unknown shelter_type {}",
            row.id, row.shelter_type
        ))
    })?;
    // Stored ratings were validated on the way in; a corrupt value is a
    // data defect worth surfacing.
    let rating = Rating::try_new(row.rating)
        .map_err(|_| ReviewRepositoryError::query(format!("review {} has corrupt rating", row.id)))?;
    Ok(row.into_review(kind, rating))
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: &NewReview) -> Result<Review, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: ReviewRow = diesel::insert_into(shelter_reviews::table)
            .values(NewReviewRow {
                user_id: review.user_id,
                shelter_id: review.shelter_id,
                shelter_type: review.shelter_type.as_str(),
                rating: review.rating.value(),
                review_text: review.review_text.as_deref(),
                review_name: review.review_name.as_deref(),
                comfort: review.comfort.map(|v| v.as_str()),
                accessibility_rating: review.accessibility_rating.map(|v| v.as_str()),
                heating_cooling_status: review.heating_cooling_status.map(|v| v.as_str()),
            })
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_review(row)
    }

    async fn list_page(
        &self,
        kind: ShelterKind,
        shelter_id: i64,
        page: PageRequest,
    ) -> Result<ReviewPage, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ReviewRow> = shelter_reviews::table
            .filter(shelter_reviews::shelter_type.eq(kind.as_str()))
            .filter(shelter_reviews::shelter_id.eq(shelter_id))
            .order(shelter_reviews::created_at.desc())
            .limit(page.size())
            .offset(page.offset())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total: i64 = shelter_reviews::table
            .filter(shelter_reviews::shelter_type.eq(kind.as_str()))
            .filter(shelter_reviews::shelter_id.eq(shelter_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items: Result<Vec<Review>, _> = rows.into_iter().map(row_to_review).collect();
        Ok(ReviewPage {
            items: items?,
            total,
        })
    }
}
