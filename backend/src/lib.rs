//! Location-based shelter finder API.
//!
//! Four kinds of public shelters (heat-wave, climate-response,
//! fine-dust, smart) live in physically distinct tables with divergent
//! schemas. This crate serves a uniform proximity search across them,
//! per-kind detail lookups, user accounts with token auth, favorites,
//! and reviews.
//!
//! Layout is hexagonal: `domain` holds entities, validation, and ports;
//! `inbound::http` adapts them to actix-web; `outbound` implements the
//! ports against PostgreSQL, JWT signing, and Argon2 hashing.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::{RequestId, RequestIdLayer};
