//! End-to-end identity flows: signup, login, refresh, me.

mod support;

use actix_web::test;
use backend::domain::ports::TokenService as _;
use backend::server::build_app;
use serde_json::{Value, json};
use support::in_memory_state;

#[actix_web::test]
async fn signup_login_refresh_me_happy_path() {
    let app = test::init_service(build_app(in_memory_state())).await;

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({"email": "jin@example.kr", "password": "secret", "age": 34, "health_type": 2}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 201);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["email"], json!("jin@example.kr"));

    // Wrong password first.
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "jin@example.kr", "password": "wrong"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 401);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({"email": "jin@example.kr", "password": "secret"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let login: Value = test::read_body_json(res).await;
    let access = login["access_token"].as_str().expect("access token").to_owned();
    let refresh = login["refresh_token"].as_str().expect("refresh token").to_owned();

    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": refresh}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let refreshed: Value = test::read_body_json(res).await;
    assert!(refreshed["access_token"].is_string());

    let req = test::TestRequest::get()
        .uri("/auth/me")
        .insert_header(("authorization", format!("Bearer {access}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let me: Value = test::read_body_json(res).await;
    assert_eq!(me["email"], json!("jin@example.kr"));
}

#[actix_web::test]
async fn signup_rejects_invalid_age_and_duplicate_email() {
    let app = test::init_service(build_app(in_memory_state())).await;

    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(json!({"email": "old@example.kr", "password": "pw", "age": 200, "health_type": 2}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));

    let payload = json!({"email": "dup@example.kr", "password": "pw", "age": 30, "health_type": 2});
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(payload.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 409);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("conflict"));
}

#[actix_web::test]
async fn access_token_cannot_be_used_for_refresh() {
    let state = in_memory_state();
    let access = state
        .tokens
        .issue(1, backend::domain::auth::TokenKind::Access)
        .expect("issue token");
    let app = test::init_service(build_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/auth/refresh")
        .set_json(json!({"refresh_token": access}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 401);
}

#[actix_web::test]
async fn malformed_json_body_gets_the_error_envelope() {
    let app = test::init_service(build_app(in_memory_state())).await;
    let req = test::TestRequest::post()
        .uri("/auth/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[actix_web::test]
async fn every_response_carries_a_request_id() {
    let app = test::init_service(build_app(in_memory_state())).await;
    let req = test::TestRequest::get().uri("/healthz").to_request();
    let res = test::call_service(&app, req).await;
    assert!(res.headers().contains_key("x-request-id"));
}
