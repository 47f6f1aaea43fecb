//! Credential adapters: JWT token signing and Argon2 password hashing.

mod jwt;
mod password;

pub use jwt::{JwtTokenService, TokenTtl};
pub use password::Argon2PasswordHasher;
