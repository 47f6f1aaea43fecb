//! Review endpoints: authenticated create, public paginated listing.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ReviewRepository as _;
use crate::domain::review::{Accessibility, Comfort, HvacStatus, NewReview, Rating, Review};

use super::auth::AuthedUser;
use super::error::ApiResult;
use super::shelters::{parse_kind, parse_shelter_id};
use super::state::HttpState;
use pagination::PageRequest;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateReviewRequest {
    rating: Rating,
    review_text: Option<String>,
    review_name: Option<String>,
    comfort: Option<Comfort>,
    accessibility_rating: Option<Accessibility>,
    heating_cooling_status: Option<HvacStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    page: Option<i64>,
    size: Option<i64>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    page: i64,
    size: i64,
    total: i64,
    items: Vec<Review>,
}

/// `POST /shelters/{kind}/{id}/reviews`
///
/// The rating is validated during deserialization; out-of-range or
/// over-precise values never reach the store.
#[post("/shelters/{kind}/{id}/reviews")]
pub async fn create(
    state: web::Data<HttpState>,
    caller: AuthedUser,
    path: web::Path<(String, String)>,
    body: web::Json<CreateReviewRequest>,
) -> ApiResult<HttpResponse> {
    let (raw_kind, raw_id) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;
    let shelter_id = parse_shelter_id(&raw_id)?;
    let body = body.into_inner();
    let review = state
        .reviews
        .insert(&NewReview {
            user_id: caller.user_id,
            shelter_id,
            shelter_type: kind,
            rating: body.rating,
            review_text: body.review_text,
            review_name: body.review_name,
            comfort: body.comfort,
            accessibility_rating: body.accessibility_rating,
            heating_cooling_status: body.heating_cooling_status,
        })
        .await?;
    Ok(HttpResponse::Created().json(review))
}

/// `GET /shelters/{kind}/{id}/reviews?page=&size=`
///
/// Public; no token required.
#[get("/shelters/{kind}/{id}/reviews")]
pub async fn list(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let (raw_kind, raw_id) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;
    let shelter_id = parse_shelter_id(&raw_id)?;
    let page = PageRequest::clamped(params.page, params.size);
    let result = state.reviews.list_page(kind, shelter_id, page).await?;
    Ok(HttpResponse::Ok().json(ListResponse {
        page: page.page(),
        size: page.size(),
        total: result.total,
        items: result.items,
    }))
}
