//! End-to-end nearby search and detail lookups over the seed dataset.

mod support;

use actix_web::test;
use backend::server::build_app;
use serde_json::{Value, json};
use support::in_memory_state;

#[actix_web::test]
async fn nearby_filters_by_radius_and_sorts_by_distance() {
    let app = test::init_service(build_app(in_memory_state())).await;

    let req = test::TestRequest::get()
        .uri("/shelters/nearby?lat=37.5665&lng=126.9780&radius=2000")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: Value = test::read_body_json(res).await;
    let items = body["items"].as_array().expect("items");
    // The Busan row sits ~325 km away and must not appear.
    assert_eq!(body["count"], json!(3));
    let distances: Vec<f64> = items
        .iter()
        .map(|item| item["distance_m"].as_f64().expect("distance"))
        .collect();
    assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(distances.iter().all(|d| *d <= 2000.0));
}

#[actix_web::test]
async fn nearby_drops_bogus_kinds_and_honours_limit() {
    let app = test::init_service(build_app(in_memory_state())).await;

    let req = test::TestRequest::get()
        .uri("/shelters/nearby?kinds=heat,bogus&lat=37.5665&lng=126.9780&radius=5000&limit=1")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["items"][0]["kind"], json!("heat"));
}

#[actix_web::test]
async fn nearby_without_coordinates_is_rejected() {
    let app = test::init_service(build_app(in_memory_state())).await;
    let req = test::TestRequest::get().uri("/shelters/nearby").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
}

#[actix_web::test]
async fn nearby_with_non_numeric_latitude_is_rejected() {
    let app = test::init_service(build_app(in_memory_state())).await;
    let req = test::TestRequest::get()
        .uri("/shelters/nearby?lat=abc&lng=127.0")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 400);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[actix_web::test]
async fn detail_round_trips_the_native_shape() {
    let app = test::init_service(build_app(in_memory_state())).await;

    let req = test::TestRequest::get()
        .uri("/shelters/detail/smart/201")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), 200);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], json!("스마트쉼터 1호"));

    let req = test::TestRequest::get()
        .uri("/shelters/detail/smart/999")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    let req = test::TestRequest::get()
        .uri("/shelters/detail/bogus/201")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}
