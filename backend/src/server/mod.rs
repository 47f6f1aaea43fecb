//! Server wiring: adapters into state, state into an actix app.

pub mod config;

use std::sync::Arc;

use actix_web::{App, web};
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};

use crate::inbound::http::{self, HttpState};
use crate::middleware::RequestIdLayer;
use crate::outbound::auth::{Argon2PasswordHasher, JwtTokenService};
use crate::outbound::persistence::{
    CatalogError, DbPool, DieselFavoriteRepository, DieselReviewRepository,
    DieselShelterStore, DieselUserRepository, SchemaCatalog,
};

pub use config::{AppConfig, ConfigError};

/// Build the handler state from live adapters.
///
/// Loads the schema catalog up front; an unresolvable shelter table
/// aborts here, before the server ever binds.
pub async fn build_state(config: &AppConfig, pool: DbPool) -> Result<HttpState, CatalogError> {
    let catalog = SchemaCatalog::load(&pool).await?;
    Ok(HttpState {
        shelters: Arc::new(DieselShelterStore::new(pool.clone(), catalog)),
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        favorites: Arc::new(DieselFavoriteRepository::new(pool.clone())),
        reviews: Arc::new(DieselReviewRepository::new(pool)),
        tokens: Arc::new(JwtTokenService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
        )),
        passwords: Arc::new(Argon2PasswordHasher),
    })
}

/// Assemble the actix app around a prepared state.
///
/// Shared with the integration tests, which supply in-memory ports.
pub fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(RequestIdLayer)
        .configure(http::configure)
}
