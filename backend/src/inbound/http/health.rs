//! Liveness probe and the root index.

use actix_web::{HttpResponse, Responder, get};
use serde_json::json;

/// `GET /healthz`
#[get("/healthz")]
pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(json!({ "ok": true }))
}

/// `GET /` — a human-oriented index of the endpoint families.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "shelter-api",
        "endpoints": [
            "/healthz",
            "/auth/signup",
            "/auth/login",
            "/auth/refresh",
            "/auth/me",
            "/shelters/nearby",
            "/shelters/detail/{kind}/{id}",
            "/shelters/{kind}/{id}/favorite",
            "/shelters/{kind}/{id}/reviews",
            "/favorites",
        ],
    }))
}
