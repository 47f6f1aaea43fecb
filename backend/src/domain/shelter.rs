//! Uniform shelter projections and the nearby-search query object.

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;
use crate::domain::kind::ShelterKind;

/// Default search radius in metres.
pub const DEFAULT_RADIUS_M: f64 = 1_500.0;

/// Default result cap.
pub const DEFAULT_LIMIT: i64 = 20;

/// Hard ceiling on the search radius; requests beyond it are invalid.
pub const MAX_RADIUS_M: f64 = 50_000.0;

/// Hard ceiling on the result cap.
pub const MAX_LIMIT: i64 = 100;

/// One row of a nearby-search response, identical in shape across kinds.
///
/// `id` is unique per `(kind, id)` pair only; consumers must always carry
/// the kind alongside the id (favorites do).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyShelter {
    /// Native id cast to text, or the synthetic hash when absent.
    pub id: String,
    /// Kind tag the row came from.
    pub kind: ShelterKind,
    /// Latitude, degrees.
    pub latitude: f64,
    /// Longitude, degrees.
    pub longitude: f64,
    /// Great-circle distance from the search origin, metres.
    pub distance_m: f64,
    /// Display name, when the table has one.
    pub name: Option<String>,
    /// Catch-all mapping of the table's remaining native columns.
    pub props: Option<Value>,
}

/// Shelter metadata resolved for a favorites listing.
///
/// Same projection as [`NearbyShelter`] minus the distance, which only
/// makes sense relative to a search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelterSummary {
    /// Native id cast to text.
    pub id: String,
    /// Kind tag.
    pub kind: ShelterKind,
    /// Latitude, degrees.
    pub latitude: f64,
    /// Longitude, degrees.
    pub longitude: f64,
    /// Display name, when present.
    pub name: Option<String>,
    /// Remaining native columns.
    pub props: Option<Value>,
}

/// Validated nearby-search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    /// Whitelisted kinds to search, in client-supplied order. May be
    /// empty, in which case the search short-circuits to no results.
    pub kinds: Vec<ShelterKind>,
    /// Origin latitude, degrees.
    pub lat: f64,
    /// Origin longitude, degrees.
    pub lng: f64,
    /// Search radius, metres.
    pub radius_m: f64,
    /// Maximum number of rows returned.
    pub limit: i64,
}

impl NearbyQuery {
    /// Validate raw parameters into a query.
    ///
    /// Unknown kinds have already been dropped by
    /// [`ShelterKind::filter_csv`]; this checks the numeric ranges.
    pub fn new(
        kinds: Vec<ShelterKind>,
        lat: f64,
        lng: f64,
        radius_m: Option<f64>,
        limit: Option<i64>,
    ) -> Result<Self, DomainError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(DomainError::invalid_request("lat must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(DomainError::invalid_request(
                "lng must be within [-180, 180]",
            ));
        }
        let radius_m = radius_m.unwrap_or(DEFAULT_RADIUS_M);
        if !radius_m.is_finite() || radius_m <= 0.0 || radius_m > MAX_RADIUS_M {
            return Err(DomainError::invalid_request(format!(
                "radius must be within (0, {MAX_RADIUS_M}] metres"
            )));
        }
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(DomainError::invalid_request(format!(
                "limit must be within [1, {MAX_LIMIT}]"
            )));
        }
        Ok(Self {
            kinds,
            lat,
            lng,
            radius_m,
            limit,
        })
    }
}

/// Derive the synthetic identifier for a shelter without a native id.
///
/// Deterministic: the same kind and coordinates always hash to the same
/// string. Mirrors the SQL expression
/// `md5(concat_ws(':', kind, lng::text, lat::text))` used in the search
/// projection, with coordinates rendered the way PostgreSQL casts
/// `float8` to text. Derived, never stored: it exists for read-side
/// correlation only and must not be used for writes.
pub fn synthetic_id(kind: ShelterKind, lat: f64, lng: f64) -> String {
    let mut hasher = Md5::new();
    hasher.update(kind.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(format_coord(lng).as_bytes());
    hasher.update(b":");
    hasher.update(format_coord(lat).as_bytes());
    hex::encode(hasher.finalize())
}

/// Shortest round-trip decimal rendering, matching `float8::text`.
fn format_coord(value: f64) -> String {
    format!("{value:?}")
}
