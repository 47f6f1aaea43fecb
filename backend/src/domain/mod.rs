//! Domain layer: entities, value objects, validation, and ports.
//!
//! Nothing in here depends on actix, diesel, or any other adapter
//! crate beyond serde for wire shapes.

pub mod auth;
pub mod error;
pub mod favorite;
pub mod geo;
pub mod kind;
pub mod ports;
pub mod review;
pub mod schema;
pub mod shelter;
pub mod user;

pub use auth::{TokenKind, TokenPair};
pub use error::{DomainError, ErrorCode};
pub use favorite::{AddFavoriteOutcome, Favorite};
pub use kind::{ShelterKind, UnknownKind};
pub use review::{Accessibility, Comfort, HvacStatus, NewReview, Rating, Review};
pub use schema::{SchemaError, TableSchema};
pub use shelter::{NearbyQuery, NearbyShelter, ShelterSummary};
pub use user::{NewUser, User};
