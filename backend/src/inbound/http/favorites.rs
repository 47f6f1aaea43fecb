//! Favorites endpoints: idempotent add, remove, and the resolved
//! listing.

use std::collections::{BTreeMap, HashMap};

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::favorite::AddFavoriteOutcome;
use crate::domain::kind::ShelterKind;
use crate::domain::ports::{FavoriteRepository as _, ShelterStore as _};
use crate::domain::shelter::ShelterSummary;

use super::auth::AuthedUser;
use super::error::ApiResult;
use super::shelters::{parse_kind, parse_shelter_id};
use super::state::HttpState;
use pagination::PageWindow;

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AddResponse {
    Created {
        ok: bool,
        #[serde(rename = "favoriteId")]
        favorite_id: i32,
    },
    Already {
        ok: bool,
        already: bool,
    },
}

#[derive(Debug, Serialize)]
struct RemoveResponse {
    ok: bool,
    removed: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    limit: Option<i64>,
    offset: Option<i64>,
}

#[derive(Debug, Serialize)]
struct FavoriteItem {
    favorite_id: i32,
    shelter_type: ShelterKind,
    shelter_id: i64,
    created_at: DateTime<Utc>,
    /// `null` when the shelter row was deleted out-of-band.
    shelter: Option<ShelterSummary>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    items: Vec<FavoriteItem>,
    limit: i64,
    offset: i64,
}

/// `POST /shelters/{kind}/{id}/favorite`
///
/// Re-adding an existing favorite succeeds with `already: true`; both
/// sides of a concurrent double-add observe success.
#[post("/shelters/{kind}/{id}/favorite")]
pub async fn add(
    state: web::Data<HttpState>,
    caller: AuthedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_kind, raw_id) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;
    let id = parse_shelter_id(&raw_id)?;
    if !state.shelters.exists(kind, id).await? {
        return Err(DomainError::not_found("shelter not found"));
    }
    let outcome = state.favorites.add(caller.user_id, kind, id).await?;
    let body = match outcome {
        AddFavoriteOutcome::Created { favorite_id } => AddResponse::Created {
            ok: true,
            favorite_id,
        },
        AddFavoriteOutcome::AlreadyFavorited => AddResponse::Already {
            ok: true,
            already: true,
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

/// `DELETE /shelters/{kind}/{id}/favorite`
#[delete("/shelters/{kind}/{id}/favorite")]
pub async fn remove(
    state: web::Data<HttpState>,
    caller: AuthedUser,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (raw_kind, raw_id) = path.into_inner();
    let kind = parse_kind(&raw_kind)?;
    let id = parse_shelter_id(&raw_id)?;
    let removed = state.favorites.remove(caller.user_id, kind, id).await?;
    Ok(HttpResponse::Ok().json(RemoveResponse {
        ok: true,
        removed: removed > 0,
    }))
}

/// `GET /favorites?limit=&offset=`
///
/// Recency-descending window over the caller's favorites, with shelter
/// metadata resolved in one batched lookup per distinct kind.
#[get("/favorites")]
pub async fn list(
    state: web::Data<HttpState>,
    caller: AuthedUser,
    params: web::Query<ListParams>,
) -> ApiResult<HttpResponse> {
    let window = PageWindow::clamped(params.limit, params.offset);
    let favorites = state.favorites.list_page(caller.user_id, window).await?;

    let mut ids_by_kind: BTreeMap<ShelterKind, Vec<i64>> = BTreeMap::new();
    for favorite in &favorites {
        ids_by_kind
            .entry(favorite.shelter_type)
            .or_default()
            .push(favorite.shelter_id);
    }
    let mut summaries: HashMap<(ShelterKind, i64), ShelterSummary> = HashMap::new();
    for (kind, ids) in ids_by_kind {
        let resolved = state.shelters.summaries_by_ids(kind, &ids).await?;
        for (id, summary) in resolved {
            summaries.insert((kind, id), summary);
        }
    }

    let items = favorites
        .into_iter()
        .map(|favorite| FavoriteItem {
            shelter: summaries.remove(&(favorite.shelter_type, favorite.shelter_id)),
            favorite_id: favorite.id,
            shelter_type: favorite.shelter_type,
            shelter_id: favorite.shelter_id,
            created_at: favorite.created_at,
        })
        .collect();
    Ok(HttpResponse::Ok().json(ListResponse {
        items,
        limit: window.limit(),
        offset: window.offset(),
    }))
}
