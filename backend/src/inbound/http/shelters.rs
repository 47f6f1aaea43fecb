//! Shelter endpoints: nearby search and kind-specific detail.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::kind::ShelterKind;
use crate::domain::ports::ShelterStore as _;
use crate::domain::shelter::{NearbyQuery, NearbyShelter};

use super::error::ApiResult;
use super::state::HttpState;

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyParams {
    kinds: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    radius: Option<f64>,
    limit: Option<i64>,
}

#[derive(Debug, Serialize)]
struct NearbyResponse {
    count: usize,
    items: Vec<NearbyShelter>,
}

/// Parse the `kind` path segment, rejecting anything off the whitelist.
pub(crate) fn parse_kind(raw: &str) -> Result<ShelterKind, DomainError> {
    ShelterKind::parse(raw)
        .ok_or_else(|| DomainError::invalid_request(format!("unknown shelter kind: {raw}")))
}

/// Parse a numeric shelter id path segment.
pub(crate) fn parse_shelter_id(raw: &str) -> Result<i64, DomainError> {
    raw.parse::<i64>()
        .map_err(|_| DomainError::invalid_request("shelter id must be an integer"))
}

/// `GET /shelters/nearby?kinds=a,b&lat=&lng=&radius=&limit=`
///
/// Unknown kinds are dropped silently; an absent `kinds` parameter
/// searches every kind. Defaults: radius 1500 m, limit 20.
#[get("/shelters/nearby")]
pub async fn nearby(
    state: web::Data<HttpState>,
    params: web::Query<NearbyParams>,
) -> ApiResult<HttpResponse> {
    let params = params.into_inner();
    let (Some(lat), Some(lng)) = (params.lat, params.lng) else {
        return Err(DomainError::invalid_request("lat and lng are required"));
    };
    let kinds = match params.kinds.as_deref() {
        Some(csv) => ShelterKind::filter_csv(csv),
        None => ShelterKind::ALL.to_vec(),
    };
    let query = NearbyQuery::new(kinds, lat, lng, params.radius, params.limit)?;
    let items = state.shelters.search_nearby(&query).await?;
    Ok(HttpResponse::Ok().json(NearbyResponse {
        count: items.len(),
        items,
    }))
}

/// `GET /shelters/detail/{kind}/{id}`
///
/// Returns the full native row for one shelter; the shape varies by
/// kind, unlike the uniform nearby projection.
#[get("/shelters/detail/{kind}/{id}")]
pub async fn detail(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_kind, raw_id) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;
    let id = parse_shelter_id(&raw_id)?;
    let row = state
        .shelters
        .fetch_detail(kind, id)
        .await?
        .ok_or_else(|| DomainError::not_found("shelter not found"))?;
    Ok(HttpResponse::Ok().json(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::domain::ports::MockShelterStore;
    use crate::inbound::http::test_utils::test_state;

    fn shelter(kind: ShelterKind, id: &str, distance_m: f64) -> NearbyShelter {
        NearbyShelter {
            id: id.to_owned(),
            kind,
            latitude: 37.5,
            longitude: 127.0,
            distance_m,
            name: None,
            props: None,
        }
    }

    async fn spawn(
        state: crate::inbound::http::state::HttpState,
    ) -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(nearby)
                .service(detail),
        )
        .await
    }

    #[actix_web::test]
    async fn nearby_requires_coordinates() {
        let app = spawn(test_state()).await;
        let req = test::TestRequest::get()
            .uri("/shelters/nearby?lat=37.5")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], json!("invalid_request"));
    }

    #[actix_web::test]
    async fn nearby_drops_unknown_kinds_silently() {
        let mut state = test_state();
        let mut shelters = MockShelterStore::new();
        shelters
            .expect_search_nearby()
            .withf(|query| query.kinds == vec![ShelterKind::Heat] && query.limit == 5)
            .returning(|_| {
                Ok(vec![
                    shelter(ShelterKind::Heat, "1", 120.0),
                    shelter(ShelterKind::Heat, "2", 480.0),
                ])
            });
        state.shelters = Arc::new(shelters);
        let app = spawn(state).await;

        let req = test::TestRequest::get()
            .uri("/shelters/nearby?kinds=heat,bogus&lat=37.5&lng=127.0&radius=1000&limit=5")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["count"], json!(2));
        assert_eq!(body["items"][0]["kind"], json!("heat"));
        assert_eq!(body["items"][0]["distance_m"], json!(120.0));
    }

    #[actix_web::test]
    async fn nearby_with_only_unknown_kinds_is_empty() {
        let mut state = test_state();
        let mut shelters = MockShelterStore::new();
        shelters
            .expect_search_nearby()
            .withf(|query| query.kinds.is_empty())
            .returning(|_| Ok(Vec::new()));
        state.shelters = Arc::new(shelters);
        let app = spawn(state).await;

        let req = test::TestRequest::get()
            .uri("/shelters/nearby?kinds=bogus&lat=37.5&lng=127.0")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["count"], json!(0));
    }

    #[actix_web::test]
    async fn nearby_rejects_out_of_range_radius() {
        let app = spawn(test_state()).await;
        let req = test::TestRequest::get()
            .uri("/shelters/nearby?lat=37.5&lng=127.0&radius=999999")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
    }

    #[actix_web::test]
    async fn detail_rejects_unknown_kind() {
        let app = spawn(test_state()).await;
        let req = test::TestRequest::get()
            .uri("/shelters/detail/bogus/1")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
    }

    #[actix_web::test]
    async fn detail_missing_row_is_not_found() {
        let mut state = test_state();
        let mut shelters = MockShelterStore::new();
        shelters.expect_fetch_detail().returning(|_, _| Ok(None));
        state.shelters = Arc::new(shelters);
        let app = spawn(state).await;

        let req = test::TestRequest::get()
            .uri("/shelters/detail/heat/999999")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 404);
    }

    #[actix_web::test]
    async fn detail_returns_the_native_row() {
        let mut state = test_state();
        let mut shelters = MockShelterStore::new();
        shelters
            .expect_fetch_detail()
            .withf(|kind, id| *kind == ShelterKind::Smart && *id == 42)
            .returning(|_, _| Ok(Some(json!({"id": 42, "solar_panel": true}))));
        state.shelters = Arc::new(shelters);
        let app = spawn(state).await;

        let req = test::TestRequest::get()
            .uri("/shelters/detail/smart/42")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["solar_panel"], json!(true));
    }
}
