//! Row structs bridging Diesel and the domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::kind::ShelterKind;
use crate::domain::review::{Accessibility, Comfort, HvacStatus, Rating, Review};
use crate::domain::user::User;

use super::schema::{favorites, shelter_reviews, users};

/// A `users` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub health_type: i32,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Strip the password hash, yielding the domain entity.
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            age: self.age,
            health_type: self.health_type,
            created_at: self.created_at,
        }
    }
}

/// Insertable `users` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: i32,
    pub health_type: i32,
}

/// A `favorites` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FavoriteRow {
    pub id: i32,
    pub user_id: i32,
    pub shelter_type: String,
    pub shelter_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Insertable `favorites` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = favorites)]
pub struct NewFavoriteRow<'a> {
    pub user_id: i32,
    pub shelter_type: &'a str,
    pub shelter_id: i64,
}

/// A `shelter_reviews` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shelter_reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i32,
    pub shelter_id: i64,
    pub shelter_type: String,
    pub rating: f64,
    pub review_text: Option<String>,
    pub review_name: Option<String>,
    pub comfort: Option<String>,
    pub accessibility_rating: Option<String>,
    pub heating_cooling_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewRow {
    /// Convert to the domain entity.
    ///
    /// Stored labels are trusted but checked: a label this build does
    /// not recognise is logged and dropped rather than failing the
    /// whole listing.
    pub fn into_review(self, kind: ShelterKind, rating: Rating) -> Review {
        Review {
            id: self.id,
            user_id: self.user_id,
            shelter_id: self.shelter_id,
            shelter_type: kind,
            rating,
            review_text: self.review_text,
            review_name: self.review_name,
            comfort: parse_label(self.comfort.as_deref(), Comfort::parse, "comfort"),
            accessibility_rating: parse_label(
                self.accessibility_rating.as_deref(),
                Accessibility::parse,
                "accessibility_rating",
            ),
            heating_cooling_status: parse_label(
                self.heating_cooling_status.as_deref(),
                HvacStatus::parse,
                "heating_cooling_status",
            ),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn parse_label<T>(raw: Option<&str>, parse: fn(&str) -> Option<T>, field: &'static str) -> Option<T> {
    let raw = raw?;
    let parsed = parse(raw);
    if parsed.is_none() {
        tracing::warn!(field, value = raw, "unrecognised stored review label");
    }
    parsed
}

/// Insertable `shelter_reviews` row.
#[derive(Debug, Insertable)]
#[diesel(table_name = shelter_reviews)]
pub struct NewReviewRow<'a> {
    pub user_id: i32,
    pub shelter_id: i64,
    pub shelter_type: &'a str,
    pub rating: f64,
    pub review_text: Option<&'a str>,
    pub review_name: Option<&'a str>,
    pub comfort: Option<&'a str>,
    pub accessibility_rating: Option<&'a str>,
    pub heating_cooling_status: Option<&'a str>,
}
