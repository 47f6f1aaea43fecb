//! PostgreSQL persistence adapters.
//!
//! The shelter tables are read through dynamic SQL built from the
//! startup [`SchemaCatalog`]; users, favorites and reviews go through
//! the regular Diesel DSL over the tables in [`schema`].

mod diesel_favorite_repository;
mod diesel_review_repository;
mod diesel_user_repository;
mod introspection;
mod models;
mod nearby_sql;
mod pool;
pub mod schema;
mod shelter_store;

pub use diesel_favorite_repository::DieselFavoriteRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use introspection::{CatalogError, SchemaCatalog};
pub use pool::{DbPool, PoolError};
pub use shelter_store::DieselShelterStore;
