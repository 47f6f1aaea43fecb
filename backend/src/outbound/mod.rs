//! Outbound adapters: implementations of the domain ports against real
//! infrastructure (PostgreSQL, JWT signing, Argon2 hashing).

pub mod auth;
pub mod persistence;
