//! HTTP adapter: handlers, DTOs, the error envelope, and routing.

pub mod auth;
pub mod error;
pub mod favorites;
pub mod health;
pub mod reviews;
pub mod routes;
pub mod shelters;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::ApiResult;
pub use routes::configure;
pub use state::HttpState;
