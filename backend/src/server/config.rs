//! Environment-driven application configuration.

use std::env;
use std::net::SocketAddr;

use crate::outbound::auth::TokenTtl;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is absent.
    #[error("missing required environment variable {name}")]
    Missing {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but unparseable.
    #[error("invalid value for {name}: {message}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What went wrong.
        message: String,
    },
}

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// HMAC key for token signing.
    pub jwt_secret: String,
    /// Access/refresh token lifetimes.
    pub token_ttl: TokenTtl,
    /// Connection pool size.
    pub pool_size: u32,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing { name })
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has
    /// a sensible default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = TokenTtl::default();
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_addr: parsed(
                "BIND_ADDR",
                SocketAddr::from(([0, 0, 0, 0], 8080)),
            )?,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl: TokenTtl {
                access_secs: parsed("ACCESS_TOKEN_TTL_SECS", defaults.access_secs)?,
                refresh_secs: parsed("REFRESH_TOKEN_TTL_SECS", defaults.refresh_secs)?,
            },
            pool_size: parsed("DB_POOL_SIZE", 10)?,
        })
    }
}
