//! In-memory port implementations backing the end-to-end tests.
//!
//! These are honest little databases, not mocks: uniqueness, ordering,
//! and pagination behave like the real adapters so the tests exercise
//! full request flows.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use backend::domain::auth::TokenKind;
use backend::domain::favorite::{AddFavoriteOutcome, Favorite};
use backend::domain::geo::haversine_m;
use backend::domain::kind::ShelterKind;
use backend::domain::ports::{
    FavoriteRepository, FavoriteRepositoryError, ReviewPage, ReviewRepository,
    ReviewRepositoryError, ShelterStore, ShelterStoreError, TokenService as _, UserCredentials,
    UserRepository, UserRepositoryError,
};
use backend::domain::review::{NewReview, Review};
use backend::domain::shelter::{NearbyQuery, NearbyShelter, ShelterSummary};
use backend::domain::user::{NewUser, User};
use backend::inbound::http::HttpState;
use backend::outbound::auth::{Argon2PasswordHasher, JwtTokenService, TokenTtl};
use pagination::{PageRequest, PageWindow};

/// One seeded shelter row.
#[derive(Clone)]
pub struct SeedShelter {
    pub kind: ShelterKind,
    pub id: i64,
    pub lat: f64,
    pub lng: f64,
    pub name: &'static str,
}

/// Fixture dataset around Seoul City Hall (37.5665, 126.9780).
pub fn seed_shelters() -> Vec<SeedShelter> {
    vec![
        SeedShelter {
            kind: ShelterKind::Heat,
            id: 101,
            lat: 37.5651,
            lng: 126.9895,
            name: "서울광장 무더위쉼터",
        },
        SeedShelter {
            kind: ShelterKind::Heat,
            id: 102,
            lat: 37.5700,
            lng: 126.9820,
            name: "시청역 쉼터",
        },
        SeedShelter {
            kind: ShelterKind::Heat,
            id: 103,
            lat: 35.1796,
            lng: 129.0756,
            name: "부산 쉼터",
        },
        SeedShelter {
            kind: ShelterKind::Smart,
            id: 201,
            lat: 37.5668,
            lng: 126.9786,
            name: "스마트쉼터 1호",
        },
    ]
}

pub struct InMemoryShelters {
    rows: Vec<SeedShelter>,
}

impl InMemoryShelters {
    pub fn new(rows: Vec<SeedShelter>) -> Self {
        Self { rows }
    }

    fn find(&self, kind: ShelterKind, id: i64) -> Option<&SeedShelter> {
        self.rows.iter().find(|row| row.kind == kind && row.id == id)
    }
}

#[async_trait]
impl ShelterStore for InMemoryShelters {
    async fn search_nearby(
        &self,
        query: &NearbyQuery,
    ) -> Result<Vec<NearbyShelter>, ShelterStoreError> {
        let mut items: Vec<NearbyShelter> = self
            .rows
            .iter()
            .filter(|row| query.kinds.contains(&row.kind))
            .filter_map(|row| {
                let distance_m = haversine_m(query.lat, query.lng, row.lat, row.lng);
                (distance_m <= query.radius_m).then(|| NearbyShelter {
                    id: row.id.to_string(),
                    kind: row.kind,
                    latitude: row.lat,
                    longitude: row.lng,
                    distance_m,
                    name: Some(row.name.to_owned()),
                    props: None,
                })
            })
            .collect();
        items.sort_by(|a, b| {
            a.distance_m
                .total_cmp(&b.distance_m)
                .then(a.kind.cmp(&b.kind))
                .then(a.id.cmp(&b.id))
        });
        items.truncate(usize::try_from(query.limit).unwrap_or(usize::MAX));
        Ok(items)
    }

    async fn fetch_detail(
        &self,
        kind: ShelterKind,
        id: i64,
    ) -> Result<Option<Value>, ShelterStoreError> {
        Ok(self.find(kind, id).map(|row| {
            json!({
                "id": row.id,
                "latitude": row.lat,
                "longitude": row.lng,
                "name": row.name,
            })
        }))
    }

    async fn exists(&self, kind: ShelterKind, id: i64) -> Result<bool, ShelterStoreError> {
        Ok(self.find(kind, id).is_some())
    }

    async fn summaries_by_ids(
        &self,
        kind: ShelterKind,
        ids: &[i64],
    ) -> Result<HashMap<i64, ShelterSummary>, ShelterStoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.find(kind, *id))
            .map(|row| {
                (
                    row.id,
                    ShelterSummary {
                        id: row.id.to_string(),
                        kind: row.kind,
                        latitude: row.lat,
                        longitude: row.lng,
                        name: Some(row.name.to_owned()),
                        props: None,
                    },
                )
            })
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<(User, String)>>,
    next_id: AtomicI32,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        if rows.iter().any(|(existing, _)| existing.email == user.email) {
            return Err(UserRepositoryError::DuplicateEmail);
        }
        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            email: user.email.clone(),
            age: user.age,
            health_type: user.health_type,
            created_at: Utc::now(),
        };
        rows.push((stored.clone(), user.password_hash.clone()));
        Ok(stored)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .find(|(user, _)| user.email == email)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        Ok(rows
            .iter()
            .find(|(user, _)| user.id == id)
            .map(|(user, _)| user.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryFavorites {
    rows: Mutex<Vec<Favorite>>,
    next_id: AtomicI32,
}

#[async_trait]
impl FavoriteRepository for InMemoryFavorites {
    async fn add(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<AddFavoriteOutcome, FavoriteRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let duplicate = rows.iter().any(|row| {
            row.user_id == user_id && row.shelter_type == kind && row.shelter_id == shelter_id
        });
        if duplicate {
            return Ok(AddFavoriteOutcome::AlreadyFavorited);
        }
        let favorite_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        rows.push(Favorite {
            id: favorite_id,
            user_id,
            shelter_type: kind,
            shelter_id,
            created_at: Utc::now(),
        });
        Ok(AddFavoriteOutcome::Created { favorite_id })
    }

    async fn remove(
        &self,
        user_id: i32,
        kind: ShelterKind,
        shelter_id: i64,
    ) -> Result<u64, FavoriteRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let before = rows.len();
        rows.retain(|row| {
            !(row.user_id == user_id && row.shelter_type == kind && row.shelter_id == shelter_id)
        });
        Ok((before - rows.len()) as u64)
    }

    async fn list_page(
        &self,
        user_id: i32,
        window: PageWindow,
    ) -> Result<Vec<Favorite>, FavoriteRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        let mut mine: Vec<Favorite> = rows
            .iter()
            .filter(|row| row.user_id == user_id)
            .cloned()
            .collect();
        // Recency-descending; ids are monotonic so they stand in for time.
        mine.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(mine
            .into_iter()
            .skip(usize::try_from(window.offset()).unwrap_or(0))
            .take(usize::try_from(window.limit()).unwrap_or(0))
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryReviews {
    rows: Mutex<Vec<Review>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ReviewRepository for InMemoryReviews {
    async fn insert(&self, review: &NewReview) -> Result<Review, ReviewRepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let now = Utc::now();
        let stored = Review {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: review.user_id,
            shelter_id: review.shelter_id,
            shelter_type: review.shelter_type,
            rating: review.rating,
            review_text: review.review_text.clone(),
            review_name: review.review_name.clone(),
            comfort: review.comfort,
            accessibility_rating: review.accessibility_rating,
            heating_cooling_status: review.heating_cooling_status,
            created_at: now,
            updated_at: now,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_page(
        &self,
        kind: ShelterKind,
        shelter_id: i64,
        page: PageRequest,
    ) -> Result<ReviewPage, ReviewRepositoryError> {
        let rows = self.rows.lock().expect("lock");
        let mut matching: Vec<Review> = rows
            .iter()
            .filter(|row| row.shelter_type == kind && row.shelter_id == shelter_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.id.cmp(&a.id));
        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(0))
            .take(usize::try_from(page.size()).unwrap_or(0))
            .collect();
        Ok(ReviewPage { items, total })
    }
}

/// A fully wired state over the in-memory ports and the seed dataset.
pub fn in_memory_state() -> HttpState {
    HttpState {
        shelters: Arc::new(InMemoryShelters::new(seed_shelters())),
        users: Arc::new(InMemoryUsers::default()),
        favorites: Arc::new(InMemoryFavorites::default()),
        reviews: Arc::new(InMemoryReviews::default()),
        tokens: Arc::new(JwtTokenService::new(b"e2e-test-key", TokenTtl::default())),
        passwords: Arc::new(Argon2PasswordHasher),
    }
}

/// Issue a bearer header for an arbitrary user id.
pub fn bearer(state: &HttpState, user_id: i32) -> (&'static str, String) {
    let token = state
        .tokens
        .issue(user_id, TokenKind::Access)
        .expect("issue token");
    ("authorization", format!("Bearer {token}"))
}
