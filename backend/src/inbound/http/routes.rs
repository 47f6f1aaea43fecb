//! Route registration and extractor configuration.
//!
//! Deserialization failures from `web::Json`, `web::Query`, and
//! `web::Path` are folded into the same error envelope the handlers
//! produce, so clients never see actix's default error bodies.

use actix_web::{ResponseError, error::InternalError, web};

use crate::domain::error::DomainError;

use super::{auth, favorites, health, reviews, shelters};

pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            String::new(),
            DomainError::invalid_request(format!("invalid request body: {err}")).error_response(),
        )
        .into()
    })
}

pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            String::new(),
            DomainError::invalid_request(format!("invalid query string: {err}")).error_response(),
        )
        .into()
    })
}

pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        InternalError::from_response(
            String::new(),
            DomainError::invalid_request(format!("invalid path parameter: {err}")).error_response(),
        )
        .into()
    })
}

/// Register every route and extractor config on the app.
///
/// `/shelters/nearby` and `/shelters/detail/...` are literal-prefixed
/// and registered ahead of the parameterised `/shelters/{kind}/...`
/// routes so they are matched first.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .service(health::index)
        .service(health::healthz)
        .service(auth::signup)
        .service(auth::login)
        .service(auth::refresh)
        .service(auth::me)
        .service(shelters::nearby)
        .service(shelters::detail)
        .service(favorites::add)
        .service(favorites::remove)
        .service(favorites::list)
        .service(reviews::create)
        .service(reviews::list);
}
